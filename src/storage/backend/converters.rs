use crate::storage::Mapping;
use migration::entities::mapping;

/// 将 Sea-ORM Model 转换为 Mapping
pub fn model_to_mapping(model: mapping::Model) -> Mapping {
    Mapping {
        code: model.code,
        target: model.target,
        created_at: model.created_at,
    }
}

/// 将 Mapping 转换为 ActiveModel（只用于插入，记录不做原地更新）
pub fn mapping_to_active_model(m: &Mapping) -> mapping::ActiveModel {
    use sea_orm::ActiveValue::Set;

    mapping::ActiveModel {
        code: Set(m.code.clone()),
        target: Set(m.target.clone()),
        created_at: Set(m.created_at),
    }
}
