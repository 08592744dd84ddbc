use anyhow::{Context, Result};
use serde_json::{Map, Number, Value};

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
}

/// Noisy exponential growth curve for one topic, clamped non-negative.
fn paper_count(base: f64, growth: f64, year_offset: usize, rng: &mut SimpleRng) -> u64 {
    let expected = base * growth.powi(year_offset as i32);
    let noisy = rng.gauss(expected, expected * 0.15);
    noisy.max(0.0).round() as u64
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let years: Vec<i32> = (2010..=2023).collect();

    // (topic, papers in 2010, yearly growth factor)
    let topics: [(&str, f64, f64); 10] = [
        ("Computer Vision", 180.0, 1.22),
        ("Natural Language Processing", 140.0, 1.25),
        ("Reinforcement Learning", 60.0, 1.20),
        ("Generative Models", 25.0, 1.35),
        ("Graph Neural Networks", 8.0, 1.40),
        ("Speech Recognition", 90.0, 1.10),
        ("Robotics", 110.0, 1.12),
        ("Explainable AI", 5.0, 1.45),
        ("Federated Learning", 2.0, 1.55),
        ("AI Safety", 3.0, 1.42),
    ];

    // Rows in records orientation, the shape the app loads by default.
    let mut records: Vec<Value> = Vec::new();
    for &(topic, base, growth) in &topics {
        let mut obj = Map::new();
        obj.insert("topic".to_string(), Value::String(topic.to_string()));
        for (offset, &year) in years.iter().enumerate() {
            let count = paper_count(base, growth, offset, &mut rng);
            obj.insert(year.to_string(), Value::Number(Number::from(count)));
        }
        records.push(Value::Object(obj));
    }

    let json_path = "ai_topics.json";
    let file = std::fs::File::create(json_path)
        .with_context(|| format!("creating {json_path}"))?;
    serde_json::to_writer_pretty(file, &records).context("writing JSON")?;

    // Same table as CSV for the alternate loader path.
    let csv_path = "ai_topics.csv";
    let mut writer = csv::Writer::from_path(csv_path)
        .with_context(|| format!("creating {csv_path}"))?;
    let mut header = vec!["topic".to_string()];
    header.extend(years.iter().map(|y| y.to_string()));
    writer.write_record(&header).context("writing CSV header")?;
    for rec in &records {
        let obj = rec.as_object().expect("record is an object");
        let mut row = vec![obj["topic"].as_str().unwrap_or("").to_string()];
        for year in &years {
            row.push(obj[&year.to_string()].to_string());
        }
        writer.write_record(&row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {} topics × {} years to {json_path} and {csv_path}",
        topics.len(),
        years.len()
    );
    Ok(())
}
