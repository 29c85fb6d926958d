use serde_json::{json, Value};

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

    /// Uniform integer in `0..bound`.
    fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// Raw counts for one replicate: more small particles than large ones.
fn counts(rng: &mut SimpleRng) -> Value {
    json!({
        "10um": rng.below(40),
        "25um": rng.below(15),
        "50um": rng.below(5),
    })
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let sample_names = ["Vial A", "Vial B", "Syringe C"];
    let mut reports = Vec::new();

    for (r_idx, date) in ["2024-03-18", "2024-04-02"].iter().enumerate() {
        let mut samples = Vec::new();
        for name in &sample_names {
            let num_replicates = 1 + rng.below(3);
            let counts_field: Value = if num_replicates == 1 {
                counts(&mut rng)
            } else {
                (0..num_replicates).map(|_| counts(&mut rng)).collect()
            };

            samples.push(json!({
                "Name": name,
                "Counts": counts_field,
                "Num Replicates": num_replicates,
                "Volume Tested per Replicate (mL)": 2.0,
                "Max Particle Size (um)": 10 + rng.below(60),
            }));
        }

        reports.push(json!({
            "Report No.": format!("R-{:03}", r_idx + 1),
            "Date": date,
            "Notes": "generated demo report",
            "Samples": samples,
        }));
    }

    let output_path = "sample_report.json";
    let text = serde_json::to_string_pretty(&Value::Array(reports))
        .expect("Failed to serialize report");
    std::fs::write(output_path, text).expect("Failed to write output file");

    println!(
        "Wrote {} reports x {} samples to {output_path}",
        2,
        sample_names.len()
    );
}
