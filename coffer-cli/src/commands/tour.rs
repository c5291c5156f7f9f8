//! Tour command - print the object-model lessons

use anyhow::Result;
use colored::Colorize;

use coffer_core::services::{Topic, TourSection};
use coffer_core::LogEvent;

use super::get_context;

pub fn run(topic: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let sections: Vec<TourSection> = match topic {
        Some(name) => {
            let topic: Topic = name.parse()?;
            ctx.log(
                LogEvent::new("command_executed")
                    .with_command("tour")
                    .with_topic(topic.as_str()),
            );
            vec![ctx.tour_service.render(topic)]
        }
        None => {
            ctx.log(LogEvent::new("command_executed").with_command("tour"));
            ctx.tour_service.render_all()
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} {}",
            section.topic.as_str().to_uppercase().bold(),
            format!("- {}", section.summary).dimmed()
        );
        for line in &section.lines {
            println!("  {}", line);
        }
    }

    Ok(())
}
