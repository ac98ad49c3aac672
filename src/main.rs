use anyhow::{Context, Result};
use clap::{Arg, Command};
use itertools::Itertools;
use log::info;
use portal::{Portal, batch::BatchStatus, enrolment};

#[async_std::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("Portal")
        .version("0.1.0")
        .author("Luke Nimtz <luke.nimtz@gmail.com>")
        .about("Student portal fee, batch and attendance views")
        .arg(
            Arg::new("payload")
                .short('p')
                .long("payload")
                .help("Sets directory or file of JSON payloads or '-' for stdin")
                .value_name("PATH")
                .default_value("-")
                .takes_value(true),
        )
        .subcommand(Command::new("fees").about("Shows fee payments with running balance"))
        .subcommand(
            Command::new("batches")
                .about("Shows batches grouped by subject")
                .arg(
                    Arg::new("status")
                        .short('s')
                        .long("status")
                        .help("Only show one status tab")
                        .value_name("STATUS")
                        .possible_values(["pursuing", "completed"])
                        .takes_value(true),
                ),
        )
        .subcommand(Command::new("subjects").about("Shows all subjects of a course with status"))
        .subcommand(Command::new("attendance").about("Shows attendance of a batch with counts"))
        .subcommand(
            Command::new("courses")
                .about("Lists the courses of a user's course field")
                .arg(
                    Arg::new("course")
                        .short('c')
                        .long("course")
                        .help("The user's course field, a comma separated string or JSON list")
                        .value_name("VALUE")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .get_matches();

    let payload = matches.value_of("payload").unwrap_or("-");
    let portal = if payload == "-" {
        Portal::new(None)
    } else {
        Portal::new(Some(payload))
    };

    if matches.subcommand_matches("fees").is_some() {
        let ledger = portal.fee_ledger().await?;
        if ledger.is_empty() {
            println!("No payment records found.");
        } else {
            print!("{ledger}");
        }
        if !ledger.divergent_fees().is_empty() {
            eprintln!(
                "WARNING: payments list different course fees: {}",
                ledger.divergent_fees().iter().join(", ")
            );
        }
    } else if let Some(batches) = matches.subcommand_matches("batches") {
        let grouping = portal.course_grouping().await?;
        let counts = grouping.counts();
        info!("Batch counts: {:?}", counts);
        match batches.value_of("status") {
            Some(status) => {
                let status = match status {
                    "completed" => BatchStatus::Completed,
                    _ => BatchStatus::Pursuing,
                };
                let mut out = String::new();
                grouping.write_status(&mut out, status)?;
                print!("{out}");
            }
            None => print!("{grouping}"),
        }
        println!(
            "Pursuing {} | Completed {} | Pending {} | Subjects {}",
            counts.pursuing, counts.completed, counts.pending, counts.subjects
        );
    } else if matches.subcommand_matches("subjects").is_some() {
        let subjects = portal.subject_list().await?;
        if subjects.subjects().is_empty() {
            println!("No subjects found for this course.");
        }
        print!("{subjects}");
    } else if matches.subcommand_matches("attendance").is_some() {
        let sheet = portal.attendance_sheet().await?;
        print!("{sheet}");
    } else if let Some(courses) = matches.subcommand_matches("courses") {
        let raw = courses.value_of("course").context("Course value required")?;
        let value: serde_json::Value = serde_json::from_str(raw)
            .or_else(|_| serde_json::to_value(raw))
            .context("Failed to read course field")?;
        let courses = enrolment::courses_of(&value);
        courses.iter().for_each(|course| println!("{course}"));
        if let Some(course) = enrolment::auto_selected_course(&courses) {
            info!("Single course {} selected", course);
        }
    };
    Ok(())
}
