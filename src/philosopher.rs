use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Instant,
};

use tracing::info;

use crate::config::Delay;
use crate::error::{Error, Result};
use crate::observer::Observer;
use crate::table::Table;

// ループの終了条件
// 判定するのは 思考 -> 食事 -> 箸を置く の 1 サイクルが終わった後だけ
#[derive(Debug, Clone, Copy)]
pub enum Stop {
    Deadline(Instant),
    Meals(usize),
}

impl Stop {
    fn reached(&self, meals: usize) -> bool {
        match *self {
            Stop::Deadline(deadline) => Instant::now() >= deadline,
            Stop::Meals(n) => meals >= n,
        }
    }
}

pub struct Philosopher<O: Observer> {
    id: usize,
    table: Arc<Table<O>>,
    think: Delay,
    eat: Delay,
}

impl<O: Observer> Philosopher<O> {
    pub fn new(id: usize, table: Arc<Table<O>>, think: Delay, eat: Delay) -> Self {
        assert!(id < table.len());
        Philosopher {
            id,
            table,
            think,
            eat,
        }
    }

    // 食事回数はこのスレッドだけが持ち、終了時に返す
    pub fn run(&self, stop: Stop) -> usize {
        let id = self.id;
        let mut rng = rand::thread_rng();
        let mut meals = 0;
        info!("Philosopher {id} started");

        while !stop.reached(meals) {
            info!("Philosopher {id} is thinking...");
            thread::sleep(self.think.sample(&mut rng));

            let forks = self.table.pick_up(id);
            meals += 1;
            info!("Philosopher {id} is eating (meal #{meals})");
            thread::sleep(self.eat.sample(&mut rng));
            forks.put_down();
        }

        info!("Philosopher {id} finished with {meals} meals");
        meals
    }
}

// 哲学者ごとにスレッドを立てて、全員が終わるまで待つ
// 戻り値は哲学者ごとの食事回数
pub fn dine<O>(table: &Arc<Table<O>>, think: Delay, eat: Delay, stop: Stop) -> Result<Vec<usize>>
where
    O: Observer + 'static,
{
    let mut v = Vec::new();
    for i in 0..table.len() {
        let philosopher = Philosopher::new(i, table.clone(), think, eat);
        let spawned = thread::Builder::new()
            .name(format!("philosopher-{i}"))
            .spawn(move || philosopher.run(stop));
        match spawned {
            Ok(t) => v.push(t),
            Err(e) => {
                // 立ち上げ済みのスレッドが終了条件に達するのを待ってからエラーを返す
                let _ = join_all(v);
                return Err(e.into());
            }
        }
    }

    join_all(v)
}

// 途中で panic したスレッドがあっても全員を join する
// エラーは最初に panic した哲学者のもの
fn join_all(v: Vec<JoinHandle<usize>>) -> Result<Vec<usize>> {
    let mut meals = Vec::with_capacity(v.len());
    let mut panicked = None;
    for (i, t) in v.into_iter().enumerate() {
        match t.join() {
            Ok(n) => meals.push(n),
            Err(_) => {
                panicked.get_or_insert(i);
            }
        }
    }
    match panicked {
        Some(i) => Err(Error::Panicked(i)),
        None => Ok(meals),
    }
}
