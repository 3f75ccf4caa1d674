use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Conversation;
use crate::domain::models::StorageBox;
use crate::domain::models::StorageName;
use crate::domain::models::ThemeName;
use crate::domain::services::help_text;
use crate::domain::services::ChatStore;
use crate::infrastructure::storage::StorageManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn storage_from_config() -> Result<StorageBox> {
    let storage_name = Config::get(ConfigKey::Storage);
    let name = match StorageName::parse(storage_name.to_string()) {
        Some(name) => name,
        None => bail!(format!("Unknown storage '{storage_name}'")),
    };

    return Ok(StorageManager::get(name, &Config::data_dir()));
}

fn format_conversation(conversation: &Conversation) -> String {
    let mut res = format!(
        "- (ID: {}) {}, Messages: {}",
        conversation.id,
        conversation.display_title(),
        conversation.messages.len()
    );

    if conversation.messages.iter().any(|m| return m.has_image()) {
        res = format!("{res}, Photos: yes");
    }

    return res;
}

async fn print_chats_list() -> Result<()> {
    let storage = storage_from_config()?;
    let chats = ChatStore::read_conversations(&storage)
        .await
        .iter()
        .map(|conversation| {
            return format_conversation(conversation);
        })
        .collect::<Vec<String>>();

    if chats.is_empty() {
        println!("There are no chats saved. You should start your first one!");
    } else {
        println!("{}", chats.join("\n"));
    }

    return Ok(());
}

async fn clear_chats() -> Result<()> {
    let mut store = ChatStore::load(storage_from_config()?).await;
    store.clear_all().await;
    store.persist_all().await?;

    println!("Deleted all chats");
    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!(
        "Created default config file at {}",
        config_file_path.to_string_lossy()
    );
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_chats() -> Command {
    return Command::new("chats")
        .about("Manage saved chats.")
        .arg_required_else_help(true)
        .subcommand(Command::new("dir").about("Print the directory chats are saved to."))
        .subcommand(Command::new("list").about("List all saved chats with their ids and titles."))
        .subcommand(Command::new("clear").about("Delete every saved chat."));
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start chatting. This is the default command.");
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return format!("CHAT {line}").underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("groxai")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_chats())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("GROXAI_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::DataDir.to_string())
                .long(ConfigKey::DataDir.to_string())
                .env("GROXAI_DATA_DIR")
                .num_args(1)
                .help(format!("Directory chats are saved to when using file storage. [default: {}]", Config::default(ConfigKey::DataDir)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Storage.to_string())
                .long(ConfigKey::Storage.to_string())
                .env("GROXAI_STORAGE")
                .num_args(1)
                .help(format!("Where chats are kept. Memory storage forgets everything on exit. [default: {}]", Config::default(ConfigKey::Storage)))
                .value_parser(PossibleValuesParser::new(StorageName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Theme.to_string())
                .short('t')
                .long(ConfigKey::Theme.to_string())
                .env("GROXAI_THEME")
                .num_args(1)
                .help(format!("Colour theme used until one is picked in the app. [default: {}]", Config::default(ConfigKey::Theme)))
                .value_parser(PossibleValuesParser::new(ThemeName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .long(ConfigKey::Username.to_string())
                .env("GROXAI_USERNAME")
                .num_args(1)
                .help(format!("Your user name displayed in all chat bubbles. [default: {}]", Config::default(ConfigKey::Username)))
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("chats", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("dir", _)) => {
                    println!("{}", Config::data_dir().to_string_lossy());
                }
                Some(("list", _)) => {
                    print_chats_list().await?;
                }
                Some(("clear", _)) => {
                    clear_chats().await?;
                }
                _ => {
                    subcommand_chats().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
