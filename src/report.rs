use std::fmt;

// 最終結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    meals: Vec<usize>,
}

impl Report {
    pub fn new(meals: Vec<usize>) -> Self {
        Report { meals }
    }

    pub fn meals(&self) -> &[usize] {
        &self.meals
    }

    pub fn total(&self) -> usize {
        self.meals.iter().sum()
    }

    pub fn average(&self) -> f64 {
        if self.meals.is_empty() {
            return 0.0;
        }
        self.total() as f64 / self.meals.len() as f64
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Final Results ===")?;
        for (i, n) in self.meals.iter().enumerate() {
            writeln!(f, "Philosopher {i} ate {n} meals")?;
        }
        writeln!(f, "Total meals served: {}", self.total())?;
        write!(f, "Average meals per philosopher: {:.2}", self.average())
    }
}
