use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let ai_args = [
        clap::arg!(--api_key <KEY> "API key (falls back to OPENAI_API_KEY)").value_name("KEY"),
        clap::arg!(--endpoint <URL> "Chat-completion endpoint base URL")
            .default_value("https://api.openai.com/v1"),
        clap::arg!(--model <MODEL> "Model identifier").default_value("gpt-4o-mini"),
        clap::arg!(--language <LANG> "Target language").default_value("Japanese"),
    ];

    let mut cmd = clap::Command::new("clipvault")
        .version("1.0.0")
        .author("Clipvault Contributors")
        .about("Capture the active browser page into an Obsidian vault")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(
            clap::Command::new("capture")
                .about("Capture the frontmost browser tab (or a copied URL) as a note")
                .arg(clap::arg!(--vault <NAME> "Obsidian vault name").required(true))
                .arg(clap::arg!(--folder <FOLDER> "Folder inside the vault").default_value(""))
                .arg(
                    clap::arg!(--tags <TAGS> "Default tags, comma or whitespace separated")
                        .default_value("bookmark,inbox"),
                )
                .arg(clap::arg!(--no_domain_tag "Do not add a tag derived from the page's domain"))
                .arg(clap::arg!(--filename <TEMPLATE> "Filename template").default_value("{{slug}}"))
                .arg(clap::arg!(--url <URL> "Capture this URL instead of querying browsers"))
                .arg(clap::arg!(--title <TITLE> "Title for the captured page (with --url)"))
                .arg(clap::arg!(--dry_run "Print the obsidian:// URI instead of opening it")),
        )
        .subcommand(
            clap::Command::new("ask")
                .about("Ask the assistant a question")
                .arg(clap::arg!(<QUESTION> "The question to answer"))
                .args(ai_args.clone()),
        )
        .subcommand(
            clap::Command::new("summarize")
                .about("Summarize text as bullet points")
                .arg(clap::arg!(<INPUT> "Text to summarize, or '-' for stdin"))
                .args(ai_args.clone()),
        )
        .subcommand(
            clap::Command::new("translate")
                .about("Translate text between Japanese and English")
                .arg(clap::arg!(<INPUT> "Text to translate, or '-' for stdin"))
                .arg(clap::arg!(--to <LANG> "Translate into this language instead of auto-detecting"))
                .args(ai_args),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "clipvault", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "clipvault", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "clipvault", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "clipvault", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
