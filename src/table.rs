use std::{
    fmt,
    sync::{Condvar, Mutex, MutexGuard},
};

use crate::observer::Observer;
use crate::topology::neighbors;

// 哲学者の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Thinking,
    Hungry,
    Eating,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Phase::Thinking => 'T',
            Phase::Hungry => 'H',
            Phase::Eating => 'E',
        };
        write!(f, "{c}")
    }
}

// "T H E T T" 形式の状態表示
pub struct StateLine<'a>(pub &'a [Phase]);

impl fmt::Display for StateLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, phase) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{phase}")?;
        }
        Ok(())
    }
}

// ロックで保護される共有状態
// 状態遷移はすべてここを通り、遷移のたびに observer へ通知する
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableState {
    phases: Vec<Phase>,
}

impl TableState {
    pub fn new(n: usize) -> Self {
        TableState {
            phases: vec![Phase::Thinking; n],
        }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    fn set(&mut self, i: usize, to: Phase, observer: &dyn Observer) {
        let from = std::mem::replace(&mut self.phases[i], to);
        observer.transition(i, from, to, &self.phases);
    }

    // j 番目が空腹で、両隣が食事中でなければ食事を始めさせる
    // 条件を満たさなければ何もしない
    pub fn test(&mut self, j: usize, observer: &dyn Observer) -> bool {
        let (left, right) = neighbors(j, self.phases.len());
        let admitted = self.phases[j] == Phase::Hungry
            && self.phases[left] != Phase::Eating
            && self.phases[right] != Phase::Eating;
        if admitted {
            self.set(j, Phase::Eating, observer);
        }
        observer.tested(j, admitted);
        admitted
    }

    // 空腹になり、すぐに食べられるか試す
    pub fn request(&mut self, i: usize, observer: &dyn Observer) -> bool {
        self.set(i, Phase::Hungry, observer);
        self.test(i, observer)
    }

    // 箸を置いて、左隣 -> 右隣の順に食べられるか試す
    // 戻り値は (評価した哲学者, 食事を始めたか) を評価順に並べたもの
    pub fn release(&mut self, i: usize, observer: &dyn Observer) -> [(usize, bool); 2] {
        self.set(i, Phase::Thinking, observer);
        let (left, right) = neighbors(i, self.phases.len());
        let l = self.test(left, observer);
        let r = self.test(right, observer);
        [(left, l), (right, r)]
    }

    // 隣り合う 2 人が同時に食事中になっていないか
    pub fn is_exclusive(&self) -> bool {
        is_exclusive(&self.phases)
    }
}

pub fn is_exclusive(phases: &[Phase]) -> bool {
    let n = phases.len();
    (0..n).all(|i| {
        let (left, right) = neighbors(i, n);
        phases[i] != Phase::Eating
            || ((left == i || phases[left] != Phase::Eating)
                && (right == i || phases[right] != Phase::Eating))
    })
}

// モニタ
// 全員の Phase を 1 つのロックで守り、条件変数は哲学者ごとに 1 つ持つ
// 条件変数に通知するのは、その哲学者が食事を始めてよくなったときだけ
pub struct Table<O: Observer> {
    state: Mutex<TableState>,
    self_cond: Vec<Condvar>,
    observer: O,
}

impl<O: Observer> Table<O> {
    pub fn with_observer(n: usize, observer: O) -> Self {
        assert!(n > 0);
        Table {
            state: Mutex::new(TableState::new(n)),
            self_cond: (0..n).map(|_| Condvar::new()).collect(),
            observer,
        }
    }

    pub fn len(&self) -> usize {
        self.self_cond.len()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn snapshot(&self) -> Vec<Phase> {
        self.lock().phases().to_vec()
    }

    // ロックが poison されている = 同期プリミティブが壊れているので続行不能
    fn lock(&self) -> MutexGuard<'_, TableState> {
        self.state.lock().expect("table lock poisoned")
    }

    // 食事を始めさせた哲学者を起こす
    // ロックを保持したまま通知するので、起きた側はロック解放後に状態を見る
    fn wake(&self, j: usize, admitted: bool) {
        if admitted {
            self.self_cond[j].notify_one();
        }
    }

    // i 番目が食べられるようになるまでブロックする
    // 返り値が Drop されると箸を置く
    pub fn pick_up(&self, i: usize) -> Forks<'_, O> {
        let mut state = self.lock();
        let admitted = state.request(i, &self.observer);
        self.wake(i, admitted);

        // spurious wakeup 対策で必ずループで再確認する
        while state.phases()[i] != Phase::Eating {
            state = self.self_cond[i]
                .wait(state)
                .expect("table lock poisoned");
        }

        Forks { table: self, id: i }
    }

    fn put_down(&self, i: usize) {
        let mut state = self.lock();
        for (j, admitted) in state.release(i, &self.observer) {
            self.wake(j, admitted);
        }
    }
}

// 食事中であることを表す型
// Drop で箸を置くので、食事を途中で抜けても両隣の再評価は必ず行われる
pub struct Forks<'a, O: Observer> {
    table: &'a Table<O>,
    id: usize,
}

impl<O: Observer> Forks<'_, O> {
    pub fn put_down(self) {}
}

impl<O: Observer> Drop for Forks<'_, O> {
    fn drop(&mut self) {
        self.table.put_down(self.id);
    }
}
