use duty_roster::config::{Requirements, RunOptions};
use duty_roster::display::print_schedule_summary;
use duty_roster::export::write_schedule_csv;
use duty_roster::parser::{check_day_columns, load_availability};
use duty_roster::schedule::assign_shifts;
use duty_roster::{logging, web};

const USAGE: &str = "usage: duty-roster <availability.csv> (--days N --first-day F | --month YYYY-MM) \
[--config requirements.json] [--out schedule.csv]\n       duty-roster web [port]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("web") {
        let port = args
            .get(1)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        tracing::info!(port, "starting web server");
        println!("Access the site at http://localhost:{}", port);

        web::start_server(port).await?;
        return Ok(());
    }

    let options = match RunOptions::from_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };
    let requirements = Requirements::from_config(&options.requirements)?;

    tracing::info!(path = %options.input.display(), "loading availability");
    let roster = load_availability(&options.input)?;
    check_day_columns(&roster, requirements.month.days);
    println!("Loaded {} people", roster.people.len());

    let mut outcome = assign_shifts(roster.people, &roster.grid, &requirements)?;
    print_schedule_summary(&outcome, requirements.month.first_day);

    write_schedule_csv(&options.output, outcome.schedule.days(), &mut outcome.people)?;
    println!("Schedule saved to {}", options.output.display());

    Ok(())
}
