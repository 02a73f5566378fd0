mod config;
mod logging;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::AppConfig;
use shoe_who_adapters::{
    board_rng, present_board, present_board_text, FsCatalogSource, JsonBoardFileStore,
    RfdFilePicker,
};
use shoe_who_application::{
    BoardOutcome, BoardService, ExportBoardCommand, ImportBoardCommand, NewBoardCommand,
};

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("invalid configuration: {error}");
            return ExitCode::from(1);
        }
    };
    logging::init_logging(&config.log_filter);

    let args: Vec<String> = std::env::args().collect();
    let command = parse_command(&args);
    match run_command(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            print_usage();
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_board_service(config: &AppConfig) -> BoardService {
    BoardService::new(
        Box::new(FsCatalogSource::in_assets(&config.assets_dir)),
        Box::new(JsonBoardFileStore),
        Box::new(RfdFilePicker),
        board_rng(config.rng_seed),
    )
}

#[derive(Debug, Clone)]
enum Command {
    Ui,
    New,
    Export { path: PathBuf },
    Show { path: PathBuf },
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn parse_command(args: &[String]) -> Result<Command, CommandError> {
    if args.len() <= 1 {
        return Ok(Command::Ui);
    }

    match args[1].as_str() {
        "ui" => Ok(Command::Ui),
        "new" => Ok(Command::New),
        "export" => {
            let path = args
                .get(2)
                .ok_or_else(|| CommandError::Usage("missing export path".to_string()))?;
            Ok(Command::Export {
                path: PathBuf::from(path),
            })
        }
        "show" => {
            let path = args
                .get(2)
                .ok_or_else(|| CommandError::Usage("missing board file".to_string()))?;
            Ok(Command::Show {
                path: PathBuf::from(path),
            })
        }
        other => Err(CommandError::Usage(format!("unknown command: {other}"))),
    }
}

fn run_command(
    command: Result<Command, CommandError>,
    config: &AppConfig,
) -> Result<(), CommandError> {
    let command = command?;
    let mut service = build_board_service(config);

    match command {
        Command::Ui => ui::launch_window(service, &config.assets_dir).map_err(CommandError::Runtime),
        Command::New => {
            expect_success(service.new_board(NewBoardCommand), "new board failed")?;
            print_board(&service);
            Ok(())
        }
        Command::Export { path } => {
            expect_success(service.new_board(NewBoardCommand), "new board failed")?;
            expect_success(
                service.export_board(ExportBoardCommand::at(path)),
                "export failed",
            )?;
            print_board(&service);
            Ok(())
        }
        Command::Show { path } => {
            expect_success(
                service.import_board(ImportBoardCommand::at(path)),
                "import failed",
            )?;
            print_board(&service);
            Ok(())
        }
    }
}

fn expect_success(outcome: BoardOutcome, context: &str) -> Result<BoardOutcome, CommandError> {
    match outcome {
        BoardOutcome::Failed(msg) => Err(CommandError::Runtime(format!("{context}: {msg}"))),
        BoardOutcome::Cancelled => Err(CommandError::Runtime(format!("{context}: cancelled"))),
        outcome => Ok(outcome),
    }
}

fn print_board(service: &BoardService) {
    let view = present_board(service.catalog(), service.board());
    println!("{}", present_board_text(&view));
}

fn print_usage() {
    println!("usage:");
    println!("  shoe-who [ui]");
    println!("  shoe-who new");
    println!("  shoe-who export <file.json>");
    println!("  shoe-who show <file.json>");
}
