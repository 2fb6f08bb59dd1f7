//! Mazewalk — generate a maze, print it, and race the three search
//! strategies through it.
//!
//! Usage: `mazewalk [seed] [width] [height]`. Without a seed, one is
//! drawn from the system RNG and printed so the run can be replayed.

use std::collections::HashSet;

use mazegrid_core::Point;
use mazegrid_gen::{Maze, MazeGen, MazeParams};
use mazegrid_paths::{SearchOptions, Strategy, find_path, path_cost};
use mazegrid_turns::Scheduler;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => rand::rng().random(),
    };
    let width: i32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(21);
    let height: i32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(15);

    let params = MazeParams {
        width,
        height,
        ..MazeParams::default()
    };
    let maze = MazeGen::new(StdRng::seed_from_u64(seed)).generate(&params)?;

    println!("seed {seed}, {}x{}", maze.grid.width(), maze.grid.height());
    println!("{}", render(&maze, &[]));

    for strategy in [Strategy::Bfs, Strategy::Dijkstra, Strategy::AStar] {
        let path = find_path(
            &maze.grid,
            maze.start,
            maze.goal,
            strategy,
            &SearchOptions::default(),
        )?
        .ok_or("accepted maze has no path")?;
        let cost = path_cost(&maze.grid, &path).ok_or("path crosses a wall")?;
        println!(
            "\n{strategy:?}: {} hops, cost {cost}",
            path.len().saturating_sub(1),
        );
        println!("{}", render(&maze, &path));
    }

    run_skirmish()?;
    Ok(())
}

/// ASCII view of the maze with an optional path overlay.
fn render(maze: &Maze, path: &[Point]) -> String {
    let on_path: HashSet<Point> = path.iter().copied().collect();
    let mut out = String::new();
    for (p, t) in &maze.grid {
        if p.x == 0 && p.y > 0 {
            out.push('\n');
        }
        out.push(match p {
            _ if p == maze.start => 'S',
            _ if p == maze.goal => 'G',
            _ if on_path.contains(&p) => '*',
            _ => t.as_char(),
        });
    }
    out
}

/// A few rounds of the turn scheduler with the classic party.
fn run_skirmish() -> Result<(), Box<dyn std::error::Error>> {
    let roster = vec![
        ("warrior".to_string(), 5),
        ("mage".to_string(), 7),
        ("archer".to_string(), 10),
        ("rogue".to_string(), 12),
    ];
    let mut scheduler = Scheduler::new(roster)?;

    println!("\nturn order:");
    for turn in 1..=12 {
        let id = scheduler.tick().ok_or("empty roster")?;
        let unit = scheduler.unit(id).ok_or("unknown unit")?;
        println!(
            "  {turn:>2}. {} (speed {}, t={})",
            unit.name(),
            unit.speed(),
            scheduler.clock(),
        );
    }
    Ok(())
}
