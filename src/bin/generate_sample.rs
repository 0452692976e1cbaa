use serde::Serialize;

/// One output row, in the column order of the public `ds_salaries.csv`.
#[derive(Serialize)]
struct Row {
    work_year: u16,
    experience_level: &'static str,
    employment_type: &'static str,
    job_title: &'static str,
    salary_in_usd: u64,
    employee_residence: &'static str,
    remote_ratio: u8,
    company_size: &'static str,
}

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

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    // (title, base salary in USD)
    let jobs = [
        ("Data Scientist", 140_000.0),
        ("Data Engineer", 135_000.0),
        ("Data Analyst", 95_000.0),
        ("Machine Learning Engineer", 155_000.0),
        ("Research Scientist", 160_000.0),
        ("Analytics Engineer", 125_000.0),
    ];
    // (country code, cost-of-labour factor)
    let countries = [("US", 1.0), ("CA", 0.8), ("GB", 0.7), ("DE", 0.65), ("IN", 0.25), ("ES", 0.5)];
    // (level code, seniority factor)
    let levels = [("EN", 0.6), ("MI", 0.85), ("SE", 1.1), ("EX", 1.5)];
    let remote_ratios = [0u8, 50, 100];
    let sizes = ["S", "M", "L"];
    let years = [2021u16, 2022, 2023];

    let output_path = "ds_salaries.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    let n_rows = 600;
    for _ in 0..n_rows {
        let (job_title, base) = rng.pick(&jobs);
        let (country, country_factor) = rng.pick(&countries);
        let (level, level_factor) = rng.pick(&levels);
        let remote_ratio = rng.pick(&remote_ratios);

        let salary = base * country_factor * level_factor * rng.gauss(1.0, 0.15).max(0.3);

        writer.serialize(Row {
            work_year: rng.pick(&years),
            experience_level: level,
            employment_type: "FT",
            job_title,
            salary_in_usd: salary.round() as u64,
            employee_residence: country,
            remote_ratio,
            company_size: rng.pick(&sizes),
        })?;
    }
    writer.flush()?;

    println!("Wrote {n_rows} job records to {output_path}");
    Ok(())
}
