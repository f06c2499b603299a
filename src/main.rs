use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use lib_hitman::prelude::*;

fn main() -> Result<()> {
    // Initialize program options and environment.
    dotenvy::dotenv().ok();
    let options = MissionOptions::parse();
    let _logger = Logger::try_with_env_or_str(options.log_level.clone().unwrap_or("info".into()).as_str())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(
            match cfg!(debug_assertions) {
                true => AdaptiveFormat::WithThread,
                _    => AdaptiveFormat::Default
            })
        .set_palette("b196;208;195;111;67".to_owned())
        .start()?;

    // Load the world and play both phases against the local referee.
    let notation = match &options.map {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read world file {}", path.display()))?,
        None => DEMO_WORLD.to_owned(),
    };
    let world = World::parse(&notation)?;
    let mut mission = Mission::new(LocalReferee::new(world), options);
    let report = mission.run()?;

    println!("==============================================");
    println!("final result:\n");
    println!("phase 1 ceiling:   {}", report.max_score);
    println!("phase 1 penalties: {}", report.phase1.penalties);
    println!("phase 1 score:     {}\n", report.phase1.score);
    println!("phase 2 penalties: {}\n", report.phase2.penalties);
    println!("total score:       {}", report.total());
    println!("==============================================");
    Ok(())
}
