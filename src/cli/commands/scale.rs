//! Scale command handler

use super::grading_setup;
use gradepoint::config::Config;
use gradepoint::core::grading::GradeScale;
use gradepoint::verbose;

/// Print the active scale, or the symbol one raw mark maps to
pub fn run(score: Option<f64>, config: &Config) -> Result<(), String> {
    let (scale, _) = grading_setup(config)?;

    if let Some(score) = score {
        let symbol = scale
            .symbol_for_score(score)
            .map_err(|e| format!("✗ {e}"))?;
        let points = scale.points_for(symbol).map_err(|e| format!("✗ {e}"))?;
        println!("{score} → {symbol} ({points:.1} points)");
        return Ok(());
    }

    print_scale(&scale);
    verbose!(
        "Source: {}",
        if config.grading.scale_file.is_empty() {
            "built-in five-point scale"
        } else {
            config.grading.scale_file.as_str()
        }
    );
    Ok(())
}

fn print_scale(scale: &GradeScale) {
    println!("{:<6} {:>6}  Marks", "Grade", "Points");
    for entry in scale.entries() {
        let range = match (entry.min_score, entry.max_score) {
            (Some(min), Some(max)) => format!("{min}-{max}"),
            _ => "-".to_string(),
        };
        println!("{:<6} {:>6.1}  {range}", entry.symbol, entry.points);
    }
}
