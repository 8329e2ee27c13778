//! Validate command - load a theme and list its instructions.

use std::collections::BTreeMap;
use std::path::PathBuf;

use mapstyle::display::DisplayModel;

use super::common::{check_scale, load_theme};
use crate::error::CliError;

/// Arguments for the validate command.
pub struct ValidateArgs {
    pub theme: PathBuf,
    pub resources: Option<PathBuf>,
    pub scale: f32,
    pub check_resources: bool,
}

/// Run the validate command.
pub fn run(args: ValidateArgs) -> Result<(), CliError> {
    let display_model = DisplayModel::default().with_user_scale_factor(check_scale(args.scale)?);
    let theme = load_theme(&args.theme, args.resources, display_model)?;

    println!("Theme: {}", args.theme.display());
    println!("  Background:        {}", theme.map_background());
    println!("  Base stroke width: {}", theme.base_stroke_width());
    println!("  Base text size:    {}", theme.base_text_size());
    println!("  Text keys:         {}", theme.text_keys().len());
    println!("  Instructions:      {}", theme.levels());

    let mut per_element: BTreeMap<&str, usize> = BTreeMap::new();
    for instruction in theme.instructions() {
        *per_element.entry(instruction.element()).or_default() += 1;
    }
    for (element, count) in &per_element {
        println!("    {:<12} {}", element, count);
    }
    println!();

    for instruction in theme.instructions() {
        match instruction.category() {
            Some(category) => println!(
                "  {:>4}  {:<12} {}  (cat={})",
                instruction.level(),
                instruction.element(),
                instruction.name(),
                category
            ),
            None => println!(
                "  {:>4}  {:<12} {}",
                instruction.level(),
                instruction.element(),
                instruction.name()
            ),
        }
    }

    if args.check_resources {
        let failed = theme.load_resources();
        println!();
        if !failed.is_empty() {
            return Err(CliError::Resources(failed));
        }
        println!("All resources decoded");
    }

    Ok(())
}
