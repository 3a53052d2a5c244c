use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use serde_json::json;
use shotgrid::{Coordinate, ErrorKind, GameApi, GameSession, SessionHandle, ShotResult};

const RANGE: usize = 10;
const FLEET: &str = "1A 1B, 3C 3D, 5E 6F, 8A 9A, 10H 10I";

#[derive(Default)]
struct Tally {
    hits: usize,
    misses: usize,
    rejected: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [workers]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let workers: usize = match args.get(2) {
        Some(w) => w.parse()?,
        None => 4,
    }
    .max(1);

    let session = SessionHandle::new(GameSession::new());
    session.start(RANGE as i64).await?;
    session.add_ships(FLEET).await?;

    let mut cells: Vec<String> = (0..RANGE)
        .flat_map(|row| (0..RANGE).map(move |column| Coordinate::new(column, row)))
        .filter_map(|c| c.format())
        .collect();
    let mut rng = SmallRng::seed_from_u64(seed);
    cells.shuffle(&mut rng);

    let chunk = cells.len().div_ceil(workers);
    let mut tasks = Vec::new();
    for part in cells.chunks(chunk) {
        let session = session.clone();
        let part = part.to_vec();
        tasks.push(tokio::spawn(async move {
            let mut tally = Tally::default();
            for cell in part {
                match session.shoot(&cell).await {
                    Ok(ShotResult { knocked: true, .. }) => tally.hits += 1,
                    Ok(_) => tally.misses += 1,
                    Err(e) if ErrorKind::of(&e) == ErrorKind::InvalidState => tally.rejected += 1,
                    Err(e) => return Err(e),
                }
            }
            Ok::<Tally, anyhow::Error>(tally)
        }));
    }

    let mut total = Tally::default();
    for task in tasks {
        let tally = task.await??;
        total.hits += tally.hits;
        total.misses += tally.misses;
        total.rejected += tally.rejected;
    }

    let stats = session.statistic().await?;
    let result = json!({
        "seed": seed,
        "workers": workers,
        "hits": total.hits,
        "misses": total.misses,
        "rejected": total.rejected,
        "finished": stats.ship_count == stats.destroyed,
        "statistic": stats,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
