use std::process;

use clap::{Arg, ArgAction, Command};

use tester_talk::commands::{
    admin::handle_admin,
    auth::{handle_login, handle_logout, handle_register},
    comments::{handle_add_comment, handle_list_comments},
    config::handle_config,
    create::handle_create,
    issues::{handle_issue, handle_issues},
    options::{handle_builds, handle_targets},
    votes::{handle_ccr, handle_verify, handle_vote},
    whoami::handle_whoami,
};
use tester_talk::interactive::run_interactive_mode;
use tester_talk::logging::{init_logging, install_panic_hook, log_error};

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id")
        .value_name("ID")
        .help(help)
        .required(true)
        .index(1)
}

fn status_arg() -> Arg {
    Arg::new("status")
        .long("status")
        .short('s')
        .value_name("STATUS")
        .help("open, in_progress, resolved, closed or ccr")
}

fn severity_arg() -> Arg {
    Arg::new("severity")
        .long("severity")
        .value_name("SEVERITY")
        .help("Low, Medium, High or Critical")
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .value_name("FORMAT")
        .help("Output format: table, simple or json")
        .default_value("table")
}

fn direction_arg() -> Arg {
    Arg::new("direction")
        .value_name("DIRECTION")
        .help("up or down")
        .default_value("up")
        .index(2)
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .help("Skip the confirmation prompt")
        .action(ArgAction::SetTrue)
}

fn build_cli() -> Command {
    Command::new("testertalk")
        .about("Tester Talk - report, search and discuss test-case issues from the terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("config")
                .about("Show or change client settings")
                .arg(Arg::new("server").long("server").value_name("URL").help("Backend base URL"))
                .arg(
                    Arg::new("reporter")
                        .long("reporter")
                        .value_name("NAME")
                        .help("Default reporter/commenter name"),
                )
                .arg(
                    Arg::new("debounce-ms")
                        .long("debounce-ms")
                        .value_name("MS")
                        .help("Search debounce delay in milliseconds")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show the current settings")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and store the session")
                .arg(Arg::new("username").long("username").short('u').value_name("USERNAME"))
                .arg(Arg::new("password").long("password").short('p').value_name("PASSWORD")),
        )
        .subcommand(Command::new("logout").about("End the current session"))
        .subcommand(
            Command::new("register")
                .about("Create a new account")
                .arg(Arg::new("username").long("username").short('u').value_name("USERNAME"))
                .arg(Arg::new("email").long("email").short('e').value_name("EMAIL"))
                .arg(Arg::new("password").long("password").short('p').value_name("PASSWORD"))
                .arg(
                    Arg::new("confirm-password")
                        .long("confirm-password")
                        .value_name("PASSWORD"),
                ),
        )
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("issues")
                .about("Search and filter issues")
                .arg(
                    Arg::new("search")
                        .value_name("TEXT")
                        .help("Free-text search")
                        .index(1),
                )
                .arg(status_arg())
                .arg(severity_arg())
                .arg(Arg::new("build").long("build").short('b').value_name("BUILD"))
                .arg(
                    Arg::new("platform")
                        .long("platform")
                        .short('p')
                        .value_name("CODE")
                        .help("Platform code, e.g. lnx86"),
                )
                .arg(Arg::new("release").long("release").short('r').value_name("RELEASE"))
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .value_name("TARGET")
                        .help("Target (requires --release)"),
                )
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("issue")
                .about("View a single issue with comments and attachments")
                .arg(id_arg("Issue id"))
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("create")
                .about("Report a new issue")
                .arg(Arg::new("title").long("title").value_name("TITLE").help("Test case title"))
                .arg(Arg::new("path").long("path").value_name("PATH").help("Test case path"))
                .arg(severity_arg().default_value("Medium"))
                .arg(Arg::new("description").long("description").short('d').value_name("TEXT"))
                .arg(Arg::new("reporter").long("reporter").value_name("NAME"))
                .arg(Arg::new("build").long("build").value_name("BUILD"))
                .arg(Arg::new("platform").long("platform").value_name("CODE"))
                .arg(Arg::new("release").long("release").value_name("RELEASE"))
                .arg(Arg::new("target").long("target").value_name("TARGET"))
                .arg(Arg::new("comments").long("comments").value_name("TEXT"))
                .arg(
                    Arg::new("tags")
                        .long("tags")
                        .value_name("TAGS")
                        .help("Comma separated tags"),
                )
                .arg(
                    Arg::new("attach")
                        .long("attach")
                        .short('a')
                        .value_name("FILE")
                        .help("File to attach (repeatable)")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("comments")
                .about("List comments of an issue")
                .arg(id_arg("Issue id")),
        )
        .subcommand(
            Command::new("comment")
                .about("Add a comment to an issue")
                .arg(id_arg("Issue id"))
                .arg(Arg::new("content").value_name("TEXT").index(2))
                .arg(Arg::new("name").long("name").short('n').value_name("NAME")),
        )
        .subcommand(
            Command::new("vote")
                .about("Vote on an issue or comment")
                .subcommand_required(true)
                .subcommand(
                    Command::new("issue")
                        .about("Vote on an issue")
                        .arg(id_arg("Issue id"))
                        .arg(direction_arg()),
                )
                .subcommand(
                    Command::new("comment")
                        .about("Vote on a comment")
                        .arg(id_arg("Comment id"))
                        .arg(direction_arg()),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Mark a comment as the verified solution")
                .arg(id_arg("Comment id")),
        )
        .subcommand(
            Command::new("ccr")
                .about("Move an issue to CCR")
                .arg(id_arg("Issue id"))
                .arg(Arg::new("number").value_name("CCR_NUMBER").index(2)),
        )
        .subcommand(Command::new("builds").about("List builds, releases and platforms"))
        .subcommand(
            Command::new("targets")
                .about("List targets of a release")
                .arg(
                    Arg::new("release")
                        .value_name("RELEASE")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("admin")
                .about("Administration (admin role required)")
                .subcommand_required(true)
                .subcommand(Command::new("users").about("List users"))
                .subcommand(
                    Command::new("set-role")
                        .about("Change a user's role")
                        .arg(id_arg("User id"))
                        .arg(
                            Arg::new("role")
                                .value_name("ROLE")
                                .help("user or admin")
                                .required(true)
                                .index(2),
                        ),
                )
                .subcommand(
                    Command::new("set-active")
                        .about("Activate or deactivate a user")
                        .arg(id_arg("User id"))
                        .arg(
                            Arg::new("active")
                                .value_name("BOOL")
                                .help("true or false")
                                .required(true)
                                .index(2)
                                .value_parser(clap::value_parser!(bool)),
                        ),
                )
                .subcommand(
                    Command::new("issues")
                        .about("List issues for administration")
                        .arg(status_arg())
                        .arg(severity_arg()),
                )
                .subcommand(
                    Command::new("set-status")
                        .about("Change an issue's status")
                        .arg(id_arg("Issue id"))
                        .arg(status_arg().required(true)),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete an issue")
                        .arg(id_arg("Issue id"))
                        .arg(yes_arg()),
                )
                .subcommand(
                    Command::new("bulk-delete")
                        .about("Delete every issue matching the filters")
                        .arg(status_arg())
                        .arg(severity_arg())
                        .arg(yes_arg()),
                ),
        )
        .subcommand(
            Command::new("ui")
                .about("Interactive terminal interface")
                .arg(
                    Arg::new("path")
                        .value_name("PATH")
                        .help("Start location, e.g. / or /issues/42")
                        .default_value("/")
                        .index(1),
                ),
        )
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }
    install_panic_hook();

    let matches = build_cli().get_matches();

    let result = match matches.subcommand() {
        Some(("config", sub_matches)) => handle_config(sub_matches).await,
        Some(("login", sub_matches)) => handle_login(sub_matches).await,
        Some(("logout", sub_matches)) => handle_logout(sub_matches).await,
        Some(("register", sub_matches)) => handle_register(sub_matches).await,
        Some(("whoami", sub_matches)) => handle_whoami(sub_matches).await,
        Some(("issues", sub_matches)) => handle_issues(sub_matches).await,
        Some(("issue", sub_matches)) => handle_issue(sub_matches).await,
        Some(("create", sub_matches)) => handle_create(sub_matches).await,
        Some(("comments", sub_matches)) => handle_list_comments(sub_matches).await,
        Some(("comment", sub_matches)) => handle_add_comment(sub_matches).await,
        Some(("vote", sub_matches)) => handle_vote(sub_matches).await,
        Some(("verify", sub_matches)) => handle_verify(sub_matches).await,
        Some(("ccr", sub_matches)) => handle_ccr(sub_matches).await,
        Some(("builds", sub_matches)) => handle_builds(sub_matches).await,
        Some(("targets", sub_matches)) => handle_targets(sub_matches).await,
        Some(("admin", sub_matches)) => handle_admin(sub_matches).await,
        Some(("ui", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .map(|s| s.as_str())
                .unwrap_or("/");
            run_interactive_mode(path).await
        }
        _ => {
            eprintln!("Unknown command. Use 'testertalk --help' for available commands.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        log_error(&e.to_string());
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
