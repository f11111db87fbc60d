//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use chote::services::{IdentifierGenerator, MappingStore, RandomSource, ThreadRngSource};
use chote::storage::{MappingRepository, MemoryRepository};
use chote::utils::{CODE_ALPHABET, ManualClock};

/// 固定起点，便于计算过期边界
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

/// 按脚本依次产出字符集下标；脚本耗尽后回退到真实随机源
#[derive(Default)]
pub struct ScriptedSource {
    queue: Mutex<VecDeque<usize>>,
}

impl ScriptedSource {
    /// 脚本化的下一批生成结果，每个 code 必须是 6 个字符集内的字符
    pub fn with_codes(codes: &[&str]) -> Self {
        let source = Self::default();
        for code in codes {
            source.push_code(code);
        }
        source
    }

    pub fn push_code(&self, code: &str) {
        let mut queue = self.queue.lock().unwrap();
        for b in code.bytes() {
            let idx = CODE_ALPHABET
                .iter()
                .position(|&c| c == b)
                .expect("character outside code alphabet");
            queue.push_back(idx);
        }
    }
}

impl RandomSource for ScriptedSource {
    fn index(&self, bound: usize) -> usize {
        match self.queue.lock().unwrap().pop_front() {
            Some(idx) => idx,
            None => ThreadRngSource.index(bound),
        }
    }
}

pub struct Harness {
    pub store: Arc<MappingStore>,
    pub clock: Arc<ManualClock>,
    pub repository: Arc<dyn MappingRepository>,
}

/// 内存后端 + 手动时钟 + 脚本随机源
pub fn memory_harness(source: ScriptedSource) -> Harness {
    let repository: Arc<dyn MappingRepository> = Arc::new(MemoryRepository::new());
    harness_with(repository, source)
}

pub fn harness_with(repository: Arc<dyn MappingRepository>, source: ScriptedSource) -> Harness {
    let clock = Arc::new(ManualClock::new(t0()));
    let store = MappingStore::new(
        repository.clone(),
        IdentifierGenerator::new(Arc::new(source)),
        clock.clone(),
        chote::services::DEFAULT_LIFETIME,
    );
    Harness {
        store: Arc::new(store),
        clock,
        repository,
    }
}
