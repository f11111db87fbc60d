use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use std::sync::Arc;

use crate::services::MappingStore;

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    #[serde(rename = "shortUrl")]
    pub short_url: Option<String>,
}

pub struct HomeService;

impl HomeService {
    /// 输入页的纯文本替代；从重定向回落时回显可用的 code
    pub async fn home(
        query: web::Query<HomeQuery>,
        store: web::Data<Arc<MappingStore>>,
    ) -> impl Responder {
        let lifetime = store.lifetime().num_seconds();
        let mut body = format!(
            "POST / with form fields longUrl and optional shortUrl to create a link.\n\
             Links expire {} seconds after creation.\n",
            lifetime
        );

        if let Some(code) = query.into_inner().short_url.filter(|c| !c.is_empty()) {
            body.push_str(&format!(
                "The code '{}' is not in use. Submit it as shortUrl to claim it.\n",
                code
            ));
        }

        HttpResponse::Ok()
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body(body)
    }
}
