use std::env;
use std::process;

use domain::adapters::fixture_repo::FixtureRepo;
use domain::service::CatalogService;

fn print_usage() {
    eprintln!(
        "{}\n\nUsage:\n  domain event\n  domain schedule [query]\n  domain speakers [query]\n\nNotes:\n  - This demo CLI reads the built-in Tech Day fixture.",
        domain::about()
    );
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1); // skip program name

    let Some(cmd) = args.next() else {
        print_usage();
        return Ok(());
    };
    let query = args.next();
    if let Some(extra) = args.next() {
        return Err(format!("unexpected argument: {}", extra));
    }

    let svc = CatalogService::new(FixtureRepo::tech_day());

    match cmd.as_str() {
        "event" => {
            let event = svc.event_info();
            println!("{}\n{} | {}\n{}", event.title, event.date, event.location, event.description);
            Ok(())
        }
        "schedule" => {
            let schedule = svc.filter_schedule(query.as_deref());
            if schedule.is_empty() {
                return Err("no talks found".into());
            }
            for entry in schedule {
                let names: Vec<&str> = entry
                    .speaker_details
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect();
                println!(
                    "{:<15} [{}] {}{}",
                    entry.talk.time,
                    entry.talk.category,
                    entry.talk.title,
                    if names.is_empty() {
                        String::new()
                    } else {
                        format!(" - {}", names.join(", "))
                    }
                );
            }
            Ok(())
        }
        "speakers" => {
            let speakers = svc.filter_speakers(query.as_deref());
            if speakers.is_empty() {
                return Err("no speakers found".into());
            }
            for s in speakers {
                println!("{} ({}) {}", s.name, s.role, s.profile_link);
            }
            Ok(())
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn main() {
    if let Err(msg) = run() {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}
