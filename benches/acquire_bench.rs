// Acquisition and syscall latency benchmark
// Measures the cost of acquire() after first use and of a chmod/stat pair
// through the shared handle. Target: cached acquire p99 < 10us.

use std::time::{Duration, Instant};

const ITERATIONS: usize = 10_000;
const WARMUP_ITERATIONS: usize = 100;

/// p50/p99/max of one measured operation
struct Percentiles {
    p50: Duration,
    p99: Duration,
    max: Duration,
}

impl Percentiles {
    fn of(mut samples: Vec<Duration>) -> Self {
        samples.sort_unstable();
        let at = |q: f64| samples[((samples.len() - 1) as f64 * q) as usize];
        Self {
            p50: at(0.50),
            p99: at(0.99),
            max: at(1.0),
        }
    }

    fn report(&self, label: &str) {
        println!("{:<16} p50={:?} p99={:?} max={:?}", label, self.p50, self.p99, self.max);
    }
}

fn sample<F: FnMut()>(mut op: F) -> Percentiles {
    for _ in 0..WARMUP_ITERATIONS {
        op();
    }

    let samples = (0..ITERATIONS)
        .map(|_| {
            let start = Instant::now();
            op();
            start.elapsed()
        })
        .collect();

    Percentiles::of(samples)
}

fn main() {
    println!("=== posixcap acquisition benchmark ===");
    println!("Iterations: {} (after {} warmup)", ITERATIONS, WARMUP_ITERATIONS);

    let cold = Instant::now();
    let posix = posixcap::acquire();
    println!("\nFirst acquire (construction): {:?}", cold.elapsed());
    println!("Binding: {} (native={})", posix.platform(), posix.is_native());

    let cached = sample(|| {
        let _ = posixcap::acquire();
    });
    cached.report("cached acquire");

    let dir = std::env::temp_dir().join(format!("posixcap-bench-{}", std::process::id()));
    let file = dir.join("target");
    if std::fs::create_dir_all(&dir).and_then(|_| std::fs::write(&file, b"")).is_ok() {
        let pair = sample(|| {
            let _ = posix.chmod(&file, 0o2755);
            let _ = posix.stat(&file);
        });
        pair.report("chmod + stat");
        let _ = std::fs::remove_dir_all(&dir);
    }

    if cached.p99 < Duration::from_micros(10) {
        println!("\n✅ Cached acquire within budget");
    } else {
        println!("\n❌ Cached acquire p99={:?} (target <10us)", cached.p99);
        std::process::exit(1);
    }
}
