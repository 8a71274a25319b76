//! Writes `imdb_movies.csv` with synthetic movies, including the kinds of
//! dirty rows the dashboard's cleaner has to cope with.

use anyhow::{Context, Result};
use serde::Serialize;

const OUTPUT_PATH: &str = "imdb_movies.csv";
const MOVIES: usize = 400;

const GENRES: [&str; 8] = [
    "Drama", "Comedy", "Action", "Thriller", "Horror", "Romance", "Sci-Fi", "Animation",
];
const DIRECTORS: [&str; 10] = [
    "Ava Brooks", "Kenji Mori", "Lucia Ferraro", "Samuel Okafor", "Ingrid Holm",
    "Rafael Duarte", "Mei Lin", "Tomasz Nowak", "Claire Dubois", "Arjun Rao",
];
const LANGUAGES: [(&str, &str); 7] = [
    ("English", "USA"),
    ("English", "UK"),
    ("French", "France"),
    ("Japanese", "Japan"),
    ("Korean", "South Korea"),
    ("Hindi", "India"),
    ("Spanish", "Spain"),
];
const WORDS: [&str; 16] = [
    "Silent", "River", "Last", "Night", "Empire", "Glass", "Summer", "Shadow",
    "Broken", "Light", "Iron", "Garden", "Paper", "Storm", "Echo", "Harbor",
];

/// One CSV row. Every cell is text so dirty values can be written verbatim.
#[derive(Debug, Clone, Serialize)]
struct SampleMovie {
    title: String,
    genre: String,
    rating: String,
    release_year: String,
    votes: String,
    budget: String,
    revenue: String,
    director: String,
    language: String,
    country: String,
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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn movie(rng: &mut SimpleRng, n: usize) -> SampleMovie {
    let title = format!("{} {} {}", rng.pick(&WORDS), rng.pick(&WORDS), n);
    let rating = rng.range(3.0, 9.6);
    let budget = rng.range(0.5, 250.0).round() * 1_000_000.0;
    // Better-rated movies tend to earn more.
    let multiplier = rng.range(0.2, 2.0) * (rating / 5.0);
    let revenue = (budget * multiplier).round();
    let (language, country) = *rng.pick(&LANGUAGES);

    SampleMovie {
        title,
        genre: rng.pick(&GENRES).to_string(),
        rating: format!("{rating:.1}"),
        release_year: format!("{}", 1970 + rng.next_u64() % 55),
        votes: format!("{}", (rng.range(0.0, 1.0).powi(3) * 2_500_000.0) as u64),
        budget: format!("{budget}"),
        revenue: format!("{revenue}"),
        director: rng.pick(&DIRECTORS).to_string(),
        language: language.to_string(),
        country: country.to_string(),
    }
}

/// Damage a clean row the way real exports get damaged.
fn dirty(rng: &mut SimpleRng, mut m: SampleMovie) -> SampleMovie {
    match rng.next_u64() % 6 {
        0 => m.title.clear(),
        1 => m.rating = "N/A".to_string(),
        2 => m.budget = "unknown".to_string(),
        3 => m.release_year = "TBA".to_string(),
        4 => m.votes = String::new(),
        _ => m.director.clear(),
    }
    m
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    let mut written = 0usize;
    for n in 0..MOVIES {
        let m = movie(&mut rng, n);
        let roll = rng.next_f64();
        if roll < 0.05 {
            // exact duplicate
            writer.serialize(&m)?;
            writer.serialize(&m)?;
            written += 2;
        } else if roll < 0.12 {
            writer.serialize(dirty(&mut rng, m))?;
            written += 1;
        } else {
            writer.serialize(&m)?;
            written += 1;
        }
    }
    writer.flush()?;

    println!("Wrote {written} rows to {OUTPUT_PATH}");
    Ok(())
}
