use std::path::Path;

use console::Style;
use poto_core::cleanup::CleanupStats;
use poto_core::layer_set::LayerSet;
use poto_core::pipeline::{DispatchStats, ProjectPlan};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    ok: Style,
    warning: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            ok: Style::new().green(),
            warning: Style::new().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_plan_summary(plan: &ProjectPlan) {
    let s = Styles::new();
    let m = &plan.metrics;

    println!();
    println!("  {}", s.title.apply_to("Poto Project"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(12)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Project"),
        s.path.apply_to(plan.project_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Scanned"),
        s.value.apply_to(format!("{} frames", plan.scanned_frames))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dark window"),
        s.value.apply_to(plan.tolerance)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Integration"),
        s.value.apply_to(format!(
            "{:.1} min lights, {:.1} min darks",
            m.cumulated_light_integration_minutes, m.cumulated_dark_integration_minutes
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!(
            "{} lights, {} darks, {} flats, {} biases",
            m.total_lights, m.total_darks, m.total_flats, m.total_biases
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Layer sets"));
    for layer_set in &plan.layer_sets {
        print_layer_set(&s, layer_set);
    }
    println!();

    if !plan.warnings.is_empty() {
        println!("  {}", s.header.apply_to("Warnings"));
        for warning in &plan.warnings {
            println!("    {}", s.warning.apply_to(warning));
        }
        println!();
    }
}

fn print_layer_set(s: &Styles, layer_set: &LayerSet) {
    let counts = format!(
        "{} lights, {} darks, {} flats, {} biases",
        layer_set.lights.len(),
        layer_set.darks.len(),
        layer_set.flats.len(),
        layer_set.biases.len()
    );
    let counts = if layer_set.is_degraded() {
        s.warning.apply_to(counts)
    } else {
        s.ok.apply_to(counts)
    };
    let manual = if layer_set.is_manual_match { " (manual)" } else { "" };
    println!(
        "    {}{}  {}",
        s.value.apply_to(&layer_set.layer_set_id),
        s.label.apply_to(manual),
        counts
    );

    for sequence in &layer_set.light_sequences {
        println!(
            "      {} {}",
            s.label.apply_to(&sequence.sequence_id),
            s.label.apply_to(format!(
                "{} lights, {:.1} min",
                sequence.count, sequence.integration_minutes
            ))
        );
    }
    println!(
        "      {} {}",
        s.label.apply_to("flats"),
        s.label.apply_to(format!(
            "{} {}",
            layer_set.flat_set_key, layer_set.flat_sequence_id
        ))
    );
}

pub fn print_dispatch_summary(document_path: &Path, stats: &DispatchStats) {
    let s = Styles::new();
    println!();
    println!(
        "  {} {} files copied into {} directories",
        s.ok.apply_to("Dispatch complete."),
        s.value.apply_to(stats.copied_files),
        s.value.apply_to(stats.created_directories)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Project file"),
        s.path.apply_to(document_path.display())
    );
}

pub fn print_cleanup_summary(dir: &Path, stats: &CleanupStats) {
    let s = Styles::new();
    println!(
        "  {} {}: {} thumbnails and {} empty directories removed",
        s.ok.apply_to("Cleared"),
        s.path.apply_to(dir.display()),
        s.value.apply_to(stats.thumbnails_removed),
        s.value.apply_to(stats.directories_removed)
    );
}

pub fn print_aborted(reason: &str) {
    let s = Styles::new();
    println!("  {} {}", s.warning.apply_to("Aborted:"), reason);
}
