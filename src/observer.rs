use std::time::Instant;

use tracing::{info, trace};

use crate::table::{Phase, StateLine};
use crate::topology::forks;

// テーブルの状態遷移を観測する
// どちらもロック保持中に呼ばれるので phases は一貫したスナップショット
// 実装側からテーブルを呼び返してはいけない (デッドロックする)
pub trait Observer: Send + Sync {
    fn transition(&self, _id: usize, _from: Phase, _to: Phase, _phases: &[Phase]) {}

    fn tested(&self, _id: usize, _admitted: bool) {}
}

// 何も出力しない
pub struct Silent;

impl Observer for Silent {}

// 状態遷移をコンソールに実況する
pub struct Narrator {
    start: Instant,
}

impl Narrator {
    pub fn new(start: Instant) -> Self {
        Narrator { start }
    }
}

impl Observer for Narrator {
    fn transition(&self, id: usize, from: Phase, to: Phase, phases: &[Phase]) {
        let (left, right) = forks(id, phases.len());
        match (from, to) {
            (_, Phase::Hungry) => info!("Philosopher {id} is hungry"),
            (_, Phase::Eating) => info!("Philosopher {id} picked up forks {left} and {right}"),
            (Phase::Eating, Phase::Thinking) => {
                info!("Philosopher {id} put down forks {left} and {right}")
            }
            _ => {}
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        info!(elapsed = %format!("{elapsed:.2}"), "State: {}", StateLine(phases));
    }

    fn tested(&self, id: usize, admitted: bool) {
        trace!(id, admitted, "test");
    }
}

#[cfg(test)]
pub use self::recorder::{Recorder, Transition};
