//! Writes a deterministic sample startup dataset as CSV, with the messy
//! header spellings real exports carry, so the whole pipeline (name
//! normalization included) can be exercised without external data.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Log-normal draw, handy for money-like quantities.
    fn log_normal(&mut self, mu: f64, sigma: f64) -> f64 {
        self.gauss(mu, sigma).exp()
    }
}

const INDUSTRIES: [&str; 8] = [
    "AI",
    "FinTech",
    "HealthTech",
    "EdTech",
    "E-Commerce",
    "Logistics",
    "SpaceTech",
    "Gaming",
];

const NAME_HEADS: [&str; 10] = [
    "Nova", "Quant", "Deep", "Hyper", "Blue", "Arc", "Flux", "Vertex", "Echo", "Prime",
];

const NAME_TAILS: [&str; 10] = [
    "Labs", "Pay", "Health", "Logic", "Works", "Loop", "Grid", "Mind", "Base", "Flow",
];

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = args.next().unwrap_or_else(|| "startup_data.csv".to_string());
    let rows: usize = match args.next() {
        Some(n) => n.parse().context("row count must be a number")?,
        None => 150,
    };

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "Startup Name",
        "Industry",
        "Funding Amount (M USD)",
        "Valuation (M USD)",
        "Revenue (M USD)",
        "Employees",
        "Market Share (%)",
        "Profitable",
        "Funding Rounds",
    ])?;

    let mut unicorns = 0usize;
    for i in 0..rows {
        let head = NAME_HEADS[(rng.next_u64() % NAME_HEADS.len() as u64) as usize];
        let tail = NAME_TAILS[(rng.next_u64() % NAME_TAILS.len() as u64) as usize];
        let name = format!("{head}{tail} {}", i + 1);

        let industry = INDUSTRIES[(rng.next_u64() % INDUSTRIES.len() as u64) as usize];

        // A few bootstrapped companies carry zero funding; the pipeline
        // must coerce their ratios instead of blowing up.
        let funding = if rng.next_f64() < 0.05 {
            0.0
        } else {
            rng.log_normal(3.0, 1.2)
        };
        let valuation = (funding.max(1.0)) * rng.log_normal(1.2, 0.8);
        let revenue = valuation * rng.log_normal(-3.0, 0.7);
        let employees = if rng.next_f64() < 0.02 {
            0
        } else {
            rng.log_normal(3.5, 1.2).round() as u64
        };
        let market_share = (rng.log_normal(-0.5, 1.0)).min(40.0);
        let profitable = u8::from(rng.next_f64() < 0.3);
        let rounds = 1 + rng.next_u64() % 6;

        if valuation >= 1000.0 {
            unicorns += 1;
        }

        writer.write_record([
            name,
            industry.to_string(),
            format!("{funding:.2}"),
            format!("{valuation:.2}"),
            format!("{revenue:.2}"),
            employees.to_string(),
            format!("{market_share:.2}"),
            profitable.to_string(),
            rounds.to_string(),
        ])?;
    }

    writer.flush()?;
    println!("Wrote {rows} startups ({unicorns} unicorns) to {output_path}");
    Ok(())
}
