use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use waymark::{
    Biome, NodeState, PathConfigCache, Scene, SceneCallbacks, SceneProps, SceneType, Season,
    TextureStore, Viewport, quarter_biome,
};

#[derive(Parser, Debug)]
#[command(name = "waymark", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame of a demo journey as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene granularity to render.
    #[arg(long, value_enum, default_value_t = SceneChoice::Monthly)]
    scene: SceneChoice,

    /// Journey length in weeks.
    #[arg(long, default_value_t = 12)]
    weeks: u32,

    /// Current week (1-based). Weeks before it render completed, the
    /// week itself in progress, the next unlocked.
    #[arg(long, default_value_t = 3)]
    week: u32,

    /// Journey quarter (1..=4), selects the biome.
    #[arg(long, default_value_t = 1)]
    quarter: u8,

    /// Seasonal tint.
    #[arg(long, value_enum, default_value_t = SeasonChoice::Spring)]
    season: SeasonChoice,

    /// Ticks to advance before rendering, letting the camera settle.
    #[arg(long, default_value_t = 60)]
    ticks: u32,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 390)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 844)]
    height: u32,

    /// Optional JSON file of node-state overrides, e.g.
    /// `{"w1": "completed", "w2": "in_progress"}`.
    #[arg(long)]
    states: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SceneChoice {
    Monthly,
    Weekly,
    Daily,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SeasonChoice {
    Spring,
    Summer,
    Fall,
    Winter,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let props = demo_props(&args)?;
    let viewport = Viewport::new(args.width, args.height)?;

    let mut scene = Scene::mount(props, SceneCallbacks::noop(), viewport, TextureStore::new())?;
    for _ in 0..args.ticks {
        scene.tick();
    }
    let frame = scene.render_frame()?;

    let rgba = unpremultiply(&frame.data);
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .context("frame buffer size mismatch")?;
    img.save(&args.out)
        .with_context(|| format!("write PNG '{}'", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}

fn demo_props(args: &FrameArgs) -> anyhow::Result<SceneProps> {
    let mut cache = PathConfigCache::new();
    let config = cache.get(args.weeks).clone();

    let season = match args.season {
        SeasonChoice::Spring => Season::Spring,
        SeasonChoice::Summer => Season::Summer,
        SeasonChoice::Fall => Season::Fall,
        SeasonChoice::Winter => Season::Winter,
    };
    let biome: Biome = quarter_biome(args.quarter);

    let mut node_states = BTreeMap::new();
    for (i, node) in config.monthly_path.iter().enumerate() {
        let week = i as u32 + 1;
        let state = if week < args.week {
            NodeState::Completed
        } else if week == args.week {
            NodeState::InProgress
        } else if week == args.week + 1 {
            NodeState::Unlocked
        } else {
            NodeState::Locked
        };
        node_states.insert(node.id.clone(), state);
    }

    let current_week_id = format!("w{}", args.week);
    let (scene_type, path_nodes, avatar_position) = match args.scene {
        SceneChoice::Monthly => (
            SceneType::Monthly,
            config.monthly_path.clone(),
            current_week_id.clone(),
        ),
        SceneChoice::Weekly => {
            let days = config
                .weekly_paths
                .get(&current_week_id)
                .context("current week outside the journey")?
                .clone();
            // Walkable demo: first day done, second in progress.
            for (i, day) in days.iter().enumerate() {
                let state = match i {
                    0 => NodeState::Completed,
                    1 => NodeState::InProgress,
                    2 => NodeState::Unlocked,
                    _ => NodeState::Locked,
                };
                node_states.insert(day.id.clone(), state);
            }
            let avatar = days[1].id.clone();
            (SceneType::Weekly, days, avatar)
        }
        SceneChoice::Daily => {
            let tasks = config.daily_layout.clone();
            for task in &tasks {
                node_states.insert(task.id.clone(), NodeState::Unlocked);
            }
            let avatar = tasks[0].id.clone();
            (SceneType::Daily, tasks, avatar)
        }
    };

    if let Some(path) = &args.states {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open states file '{}'", path.display()))?;
        let overrides: BTreeMap<String, NodeState> =
            serde_json::from_reader(std::io::BufReader::new(file))
                .context("parse states JSON")?;
        node_states.extend(overrides);
    }

    Ok(SceneProps {
        scene_type,
        journey_id: format!("demo-{}-week", args.weeks),
        current_quarter: args.quarter.clamp(1, 4),
        current_week: args.week,
        current_day: 1,
        path_nodes,
        node_states,
        biome,
        season,
        avatar_position,
    })
}

fn unpremultiply(premul: &[u8]) -> Vec<u8> {
    let mut out = premul.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
    out
}
