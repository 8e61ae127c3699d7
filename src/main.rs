//! `ambler`: headless driver for walk meshes.
//!
//! ```bash
//! ambler info assets/level.pnct
//! ambler locate assets/level.pnct 1.0 -2.5 3.0
//! RUST_LOG=walker=debug ambler simulate assets/level.pnct --ticks 120 --input fl --turn 45
//! ```

mod config;
mod walker;

use std::error::Error;
use std::path::PathBuf;

use ambler_geom::Vec3;
use clap::{Parser, Subcommand};

use crate::config::load_config;
use crate::walker::{MoveInput, Walker};

#[derive(Parser, Debug)]
#[command(name = "ambler", version, about = "Walk-mesh navigation toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print size, bounds and edge statistics of a mesh asset
    Info { mesh: PathBuf },

    /// Snap a world point onto the mesh surface
    Locate {
        mesh: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        y: f32,
        #[arg(allow_negative_numbers = true)]
        z: f32,
    },

    /// Drive a walker over the mesh with fixed input for a number of ticks
    Simulate {
        mesh: PathBuf,

        /// TOML settings; missing file means defaults
        #[arg(long, default_value = "ambler.toml")]
        config: PathBuf,

        #[arg(long, default_value_t = 60)]
        ticks: u32,

        /// Seconds per tick
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// Spawn point "x,y,z" (overrides the config)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        spawn: Option<Vec3>,

        /// Held keys: any of f, b, l, r
        #[arg(long, default_value = "f")]
        input: String,

        /// Turn rate in degrees per second
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        turn: f32,
    },
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{}'", s));
    }
    let mut xyz = [0.0f32; 3];
    for (slot, part) in xyz.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|e| format!("'{}': {}", part, e))?;
    }
    Ok(Vec3::from_array(xyz))
}

fn fmt_v(v: Vec3) -> String {
    format!("({:.4}, {:.4}, {:.4})", v.x, v.y, v.z)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Info { mesh } => {
            let mesh = ambler_io::load_walk_mesh(&mesh)?;
            let stats = mesh.stats();
            println!("vertices:        {}", stats.vertices);
            println!("triangles:       {}", stats.triangles);
            println!("boundary edges:  {}", stats.boundary_edges);
            println!("duplicate edges: {}", stats.duplicate_edges);
            match mesh.bounds() {
                Some(b) => println!("bounds:          {} .. {}", fmt_v(b.min), fmt_v(b.max)),
                None => println!("bounds:          (empty)"),
            }
        }
        Command::Locate { mesh, x, y, z } => {
            let mesh = ambler_io::load_walk_mesh(&mesh)?;
            if mesh.is_empty() {
                return Err("mesh has no triangles".into());
            }
            let query = Vec3::new(x, y, z);
            let wp = mesh.start(query);
            let at = mesh.world_point(&wp);
            println!("triangle: {:?}", wp.triangle);
            println!("weights:  {:?}", wp.weights.0);
            println!("point:    {}", fmt_v(at));
            println!("normal:   {}", fmt_v(mesh.world_normal(&wp)));
            println!("distance: {:.4}", (query - at).length());
        }
        Command::Simulate {
            mesh,
            config,
            ticks,
            dt,
            spawn,
            input,
            turn,
        } => {
            let cfg = load_config(&config)?;
            let input = MoveInput::parse(&input)?;
            let mesh = ambler_io::load_walk_mesh(&mesh)?.with_params(cfg.walk);
            let spawn = spawn.unwrap_or(Vec3::from_array(cfg.walker.spawn));
            let mut walker = Walker::spawn(&mesh, spawn, Vec3::from_array(cfg.walker.forward), cfg.walker.speed)
                .ok_or("mesh has no triangles to spawn on")?;

            let yaw_per_tick = turn.to_radians() * dt;
            let start = walker.pos;
            for tick in 0..ticks {
                walker.turn(yaw_per_tick);
                walker.update(&mesh, input, dt);
                log::trace!(target: "walker", "[tick {}] {}", tick, fmt_v(walker.pos));
            }

            println!("ticks:    {}", ticks);
            println!("start:    {}", fmt_v(start));
            println!("end:      {}", fmt_v(walker.pos));
            println!("up:       {}", fmt_v(walker.up));
            println!("forward:  {}", fmt_v(walker.forward));
            println!("triangle: {:?}", walker.at.triangle);
        }
    }
    Ok(())
}
