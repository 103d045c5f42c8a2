//! Career benchmark table — reference skill profiles users are compared
//! against on the dashboard radar chart.

use std::collections::HashMap;

/// Expected skill levels for a career, ordered like [`Category::ALL`]:
/// communication, emotional-intelligence, problem-solving, leadership,
/// resilience.
///
/// [`Category::ALL`]: crate::assessment::scoring::Category::ALL
pub type BenchmarkVector = [u8; 5];

/// Uniform profile served for careers without a curated benchmark.
const DEFAULT_BENCHMARK: BenchmarkVector = [7, 7, 7, 7, 7];

/// Read-only mapping from career name to its benchmark vector.
///
/// Lookup is exact and case-sensitive. Loading curated vectors from
/// configuration instead of source is an open improvement.
pub struct BenchmarkTable {
    careers: HashMap<String, BenchmarkVector>,
    default: BenchmarkVector,
}

impl BenchmarkTable {
    /// The built-in table compiled into the binary.
    pub fn builtin() -> Self {
        let careers = [
            ("Law", [9, 7, 7, 8, 8]),
            ("Software Engineering", [6, 6, 9, 6, 7]),
            ("Marketing", [9, 8, 6, 7, 6]),
            ("Finance", [7, 6, 8, 7, 8]),
            ("Healthcare", [8, 9, 7, 6, 8]),
        ]
        .into_iter()
        .map(|(career, vector)| (career.to_string(), vector))
        .collect();

        Self {
            careers,
            default: DEFAULT_BENCHMARK,
        }
    }

    /// Returns the benchmark for `career`, or the uniform default when the
    /// career has no curated vector.
    pub fn lookup(&self, career: &str) -> BenchmarkVector {
        self.careers.get(career).copied().unwrap_or(self.default)
    }
}
