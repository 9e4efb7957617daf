// florascope - explore geotagged plant records from your terminal
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use florascope_lib::{
    core::{ExportProjector, Marker, MarkerSurface, QueryEngine},
    session::{NotificationOutcome, Notifier, SessionEntitlements, SessionFacade, SubmitRequest},
    store::{dataset, parse_coordinate, parse_window, parse_year, FilterPredicate, RecordDraft},
    RecordStore,
};
use std::env;
use std::io::{BufRead, Write};

fn main() -> anyhow::Result<()> {
    // Grab whatever the user typed
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "show" => handle_show(&args[2..]),
        "summary" => handle_summary(&args[2..]),
        "export" => handle_export(&args[2..]),
        "session" => handle_session(),
        "status" => handle_status(),
        "version" | "-v" | "--version" => {
            println!("florascope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

/// Marker surface that draws to stdout instead of a map
#[derive(Default)]
struct TerminalSurface {
    markers: Vec<Marker>,
}

impl MarkerSurface for TerminalSurface {
    fn clear(&mut self) {
        self.markers.clear();
    }

    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn render(&mut self) {
        println!("[map] {} marker(s) on the surface", self.markers.len());
    }
}

/// Notifier that prints instead of emailing
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&self, recipient: &str, message: &str) -> NotificationOutcome {
        println!("[notify -> {}] {}", recipient, message);
        NotificationOutcome::Delivered
    }
}

/// Pull `[prefix] [--within years]` out of the arg list
fn parse_filter_args(args: &[String]) -> FilterPredicate {
    let mut prefix = String::new();
    let mut window = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--within" => {
                i += 1;
                if i < args.len() {
                    // Garbage degrades to "no window", same as the UI field
                    window = parse_window(&args[i]);
                }
            }
            arg => {
                if prefix.is_empty() {
                    prefix = arg.to_string();
                }
            }
        }
        i += 1;
    }

    FilterPredicate::new(prefix, window)
}

fn handle_show(args: &[String]) -> anyhow::Result<()> {
    let predicate = parse_filter_args(args);

    let store = RecordStore::new(dataset::bundled()?);
    let engine = QueryEngine::new(store.current_year());
    let projection = engine.evaluate(&predicate, &store.working_set());

    if projection.is_empty() {
        println!("No records match.");
        return Ok(());
    }

    println!("\n{} record(s):", projection.len());
    println!("{}", "=".repeat(60));
    for (i, record) in projection.iter().enumerate() {
        let position = match record.position() {
            Some((lat, lon)) => format!("{:.4}, {:.4}", lat, lon),
            None => "unmapped".to_string(),
        };
        println!(
            "{:3}. {} ({}) [{}] @ {}",
            i + 1,
            record.scientific_name,
            record.year_label(),
            record.age_category,
            position
        );
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

fn handle_summary(args: &[String]) -> anyhow::Result<()> {
    let predicate = parse_filter_args(args);

    let store = RecordStore::new(dataset::bundled()?);
    let engine = QueryEngine::new(store.current_year());
    let projection = engine.evaluate(&predicate, &store.working_set());

    if projection.is_empty() {
        println!("No records match.");
        return Ok(());
    }

    println!("\nSpecies summary ({} record(s)):", projection.len());
    println!("{}", "=".repeat(60));
    for (species, count) in engine.species_counts(&projection) {
        println!("  {:<40} {}", species, count);
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

fn handle_export(args: &[String]) -> anyhow::Result<()> {
    // Peel off --out before the shared filter parsing sees it
    let mut filter_args = Vec::new();
    let mut out_path: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--out" => {
                i += 1;
                if i < args.len() {
                    out_path = Some(args[i].clone());
                }
            }
            arg => filter_args.push(arg.to_string()),
        }
        i += 1;
    }

    let predicate = parse_filter_args(&filter_args);

    let store = RecordStore::new(dataset::bundled()?);
    let engine = QueryEngine::new(store.current_year());
    let projection = engine.evaluate(&predicate, &store.working_set());

    let path = out_path
        .unwrap_or_else(|| ExportProjector::filename(chrono::Utc::now().date_naive()));

    match ExportProjector::to_csv(&projection) {
        Ok(bytes) => {
            std::fs::write(&path, bytes)?;
            println!("Wrote {} record(s) to {}", projection.len(), path);
        }
        Err(e) => eprintln!("{}", e.user_message()),
    }

    Ok(())
}

fn handle_status() -> anyhow::Result<()> {
    let store = RecordStore::new(dataset::bundled()?);
    let stats = store.stats();

    println!("\nflorascope Status");
    println!("{}", "=".repeat(60));
    println!("  Base records:    {}", stats.base_records);
    println!("  Overlay records: {}", stats.overlay_records);
    println!("  Current year:    {}", store.current_year());
    println!("{}", "=".repeat(60));

    Ok(())
}

// Interactive loop. This is where insert/edit/delete live, since the
// overlay only exists for the lifetime of one session.
fn handle_session() -> anyhow::Result<()> {
    let store = RecordStore::new(dataset::bundled()?);
    let mut facade = SessionFacade::new(
        store,
        TerminalSurface::default(),
        SessionEntitlements::default(),
        ConsoleNotifier,
    );

    println!("florascope session. Type 'help' for commands, 'quit' to leave.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));

        match verb {
            "quit" | "exit" => break,
            "help" => print_session_help(),
            "filter" => facade.set_species_filter(rest),
            "within" => facade.set_recency_window(rest),
            "list" => {
                for record in facade.projection() {
                    let id = record
                        .id
                        .map(|id| format!("#{}", id))
                        .unwrap_or_else(|| "base".to_string());
                    println!(
                        "  [{}] {} ({}) [{}]",
                        id,
                        record.scientific_name,
                        record.year_label(),
                        record.age_category
                    );
                }
            }
            "add" => match facade.submit(SubmitRequest::Insert {
                draft: parse_draft(rest),
            }) {
                Ok(record) => println!("Added record #{}", record.id.unwrap_or_default()),
                Err(e) => eprintln!("{}", e.user_message()),
            },
            "edit" => {
                let (id_text, fields) = rest.split_once(' ').unwrap_or((rest, ""));
                match id_text.parse::<i64>() {
                    Ok(id) => match facade.submit(SubmitRequest::Edit {
                        id,
                        draft: parse_draft(fields),
                    }) {
                        Ok(record) => println!("Updated record #{}", record.id.unwrap_or_default()),
                        Err(e) => eprintln!("{}", e.user_message()),
                    },
                    Err(_) => eprintln!("Usage: edit <id> <name>;<lat>;<lon>;<year>;<notes>"),
                }
            }
            "delete" => match rest.trim().parse::<i64>() {
                Ok(id) => match facade.delete(id) {
                    Ok(removed) => println!("Deleted {}", removed.scientific_name),
                    Err(e) => eprintln!("{}", e.user_message()),
                },
                Err(_) => eprintln!("Usage: delete <id>"),
            },
            "signin" => {
                if facade.sign_in(rest) {
                    println!("{}", facade.editor_status());
                } else {
                    eprintln!("Sign-in needs a name");
                }
            }
            "signout" => {
                facade.sign_out();
                println!("{}", facade.editor_status());
            }
            "enroll" => match facade.enroll_notifications(rest) {
                Ok(outcome) => {
                    if !outcome.is_delivered() {
                        eprintln!("Enrolled, but the welcome message failed to send");
                    }
                }
                Err(e) => eprintln!("{}", e.user_message()),
            },
            "export" => {
                let path = if rest.is_empty() {
                    ExportProjector::filename(chrono::Utc::now().date_naive())
                } else {
                    rest.to_string()
                };
                match facade.export() {
                    Ok(bytes) => {
                        std::fs::write(&path, bytes)?;
                        println!("Wrote {}", path);
                    }
                    Err(e) => eprintln!("{}", e.user_message()),
                }
            }
            "status" => {
                let stats = facade.store().stats();
                println!("{}", facade.editor_status());
                println!(
                    "  {} base + {} overlay record(s), {} in view",
                    stats.base_records,
                    stats.overlay_records,
                    facade.projection().len()
                );
            }
            _ => eprintln!("Unknown command: {} (try 'help')", verb),
        }
    }

    Ok(())
}

/// Parse `name;lat;lon;year;notes` into a draft. Missing or malformed
/// numeric parts just come out unset.
fn parse_draft(input: &str) -> RecordDraft {
    let mut parts = input.splitn(5, ';').map(str::trim);

    RecordDraft {
        scientific_name: parts.next().unwrap_or_default().to_string(),
        latitude: parts.next().map(parse_coordinate).unwrap_or_default(),
        longitude: parts.next().map(parse_coordinate).unwrap_or_default(),
        year: parts.next().map(parse_year).unwrap_or_default(),
        notes: parts.next().filter(|s| !s.is_empty()).map(String::from),
    }
}

fn print_session_help() {
    println!(
        r#"Session commands:
    filter <prefix>                        Filter by species name prefix
    within <years>                         Only records at most this old
    list                                   Show the current projection
    add <name>;<lat>;<lon>;<year>;<notes>  Add a record (editors only)
    edit <id> <name>;<lat>;<lon>;<year>;<notes>
    delete <id>                            Remove a record you added
    signin <name>                          Become a privileged editor
    signout                                Back to read-only
    enroll <address>                       Enroll for update notifications
    export [path]                          Export the projection as CSV
    status                                 Session and store status
    quit                                   Leave the session"#
    );
}

fn print_usage() {
    println!(
        r#"florascope v{} - plant occurrence records, filtered and mapped

USAGE:
    florascope <COMMAND> [OPTIONS]

COMMANDS:
    show [prefix] [--within years]     List matching records
    summary [prefix] [--within years]  Per-species record counts
    export [prefix] [--within years] [--out path]
                                       Write matching records as CSV
    session                            Interactive session (add/edit/delete)
    status                             Show dataset statistics
    version                            Show version
    help                               Show this help

EXAMPLES:
    florascope show euc
    florascope show --within 5
    florascope summary
    florascope export banksia --out banksia.csv
    florascope session

Records added in a session live only for that session.

For more info: https://github.com/monishobaid/florascope
"#,
        env!("CARGO_PKG_VERSION")
    );
}
