//! Output formatting module

use serde::Serialize;
use vaultcoach_act::{ChatCompletion, KnowledgeBase, SkillLevel};
use vaultcoach_app::app::AnalysisReport;
use vaultcoach_domain::model::PoleRecommendation;
use vaultcoach_types::{Locale, OutputFormat, Result};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

pub fn output_report(output_format: OutputFormat, report: &AnalysisReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(report);
    }

    let r = &report.result;
    let msg = &report.messages;

    println!("\nRun-up Analysis");
    println!("===============");
    println!("Effective lbs:       {:.2}", r.effective_lbs);
    println!("Resistance index:    {:.2}", r.resistance_index);

    println!("\n--- Pole ---");
    println!("{}", msg.recommendation);
    match &r.recommendation {
        PoleRecommendation::Recommended {
            resistance_index,
            target_resistance_index,
            ..
        } => println!(
            "RI:                  {:.2} (target {:.2})",
            resistance_index, target_resistance_index
        ),
        PoleRecommendation::NoSuitablePole {
            target_resistance_index,
        } => println!("Target RI:           {:.2}", target_resistance_index),
        PoleRecommendation::KeepCurrent => {}
    }
    if let (Some(grip), Some(fists)) = (r.new_pole_grip_from_top_cm, r.new_pole_grip_fists) {
        println!("New pole grip:       {:.1} cm from top ({} fists)", grip, fists);
    }

    println!("\n--- Grip ---");
    println!(
        "Current grip:        {:.1} cm ({} fists)",
        r.current_grip_position_cm, r.current_grip_fists
    );
    if let (Some(adj), Some(direction)) = (&r.grip_adjustment, &msg.grip_direction) {
        println!(
            "Adjust:              {} {:.0} cm -> {:.1} cm ({} fists)",
            direction, adj.amount_cm, adj.new_grip_position_cm, adj.new_grip_fists
        );
    }

    println!("\n--- Takeoff & Mid-mark ---");
    println!("Takeoff (physical):  {:.2} m", r.takeoff_physical_m);
    println!("Takeoff (ideal):     {:.2} m", r.ideal_takeoff_m);
    println!("Mid-mark (current):  {:.2} m", r.current_mid_mark_m);
    println!("Mid-mark (advice):   {:.2} m", r.recommended_mid_mark_m);
    println!("Difference:          {:+.1} cm", r.mid_mark_difference_cm);
    println!("Start position:      {}", msg.start_adjustment.as_deref().unwrap_or("-"));

    println!("\nFeedback:");
    println!("{}", msg.tech_feedback);

    if let Some(notes) = &report.received_data.notes {
        if !notes.trim().is_empty() {
            println!("\nNotes: {}", notes);
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct PhaseView<'a> {
    id: u8,
    name: &'a str,
    term_en: &'a str,
    video_url: &'a str,
    source_url: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggested_prompts: Vec<vaultcoach_act::SuggestedPrompt>,
}

pub fn output_phases(
    output_format: OutputFormat,
    kb: &KnowledgeBase,
    level: Option<SkillLevel>,
    locale: Locale,
) -> Result<()> {
    let views: Vec<PhaseView> = kb
        .phases
        .iter()
        .map(|p| PhaseView {
            id: p.id,
            name: &p.name,
            term_en: &p.term_en,
            video_url: &p.video_url,
            source_url: &p.source_url,
            suggested_prompts: level.map(|l| kb.suggested_prompts(p.id, l)).unwrap_or_default(),
        })
        .collect();

    if output_format == OutputFormat::Json {
        return print_json(&views);
    }

    if let Some(profile) = level.and_then(|l| kb.skill_profile(l)) {
        let (label, strategy) = if locale.is_en() {
            (&profile.label_en, &profile.strategy_en)
        } else {
            (&profile.label, &profile.strategy)
        };
        println!("Skill level: {} ({})", label, profile.range);
        println!("{}\n", strategy);
    }

    println!("{:<4} {:<40} {}", "ID", "Phase", "Term");
    println!("{}", "-".repeat(70));
    for view in &views {
        println!("{:<4} {:<40} {}", view.id, view.name, view.term_en);
        for prompt in &view.suggested_prompts {
            let label = if locale.is_en() { &prompt.label_en } else { &prompt.label };
            println!("       - {}", label);
        }
    }

    Ok(())
}

pub fn output_completion(output_format: OutputFormat, completion: &ChatCompletion) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(completion);
    }

    println!(
        "model={} temperature={} max_tokens={}",
        completion.model, completion.temperature, completion.max_tokens
    );
    for message in &completion.messages {
        println!("\n===== {} =====", message.role.as_str());
        println!("{}", message.content);
    }
    Ok(())
}

pub fn output_advice(output_format: OutputFormat, reply: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&serde_json::json!({ "message": reply }));
    }
    println!("{}", reply);
    Ok(())
}
