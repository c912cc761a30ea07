use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let convert = clap::Command::new("convert")
        .about("Convert a directory of HTML pages into one JSON array")
        .arg(
            clap::arg!([INPUT] "Directory of HTML pages, or a single HTML file")
                .default_value("html_pages")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file, or '-' for stdout")
                .default_value("posts.json")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--extension <EXT> "Extension of page files").default_value("html"))
        .arg(clap::arg!(--compact "Write single-line JSON"))
        .arg(clap::arg!(--sequential "Convert pages one at a time"))
        .arg(clap::arg!(--"descend-unknown" "Convert the children of unsupported elements"))
        .arg(clap::arg!(--"inline-children" "Keep every inline child, not only spans"))
        .arg(clap::arg!(--"max-depth" <NUM> "Maximum element nesting").default_value("256"));

    let export = clap::Command::new("export")
        .about("Export the pages under a parent page of a remote document as HTML files")
        .arg(clap::arg!(--doc <ID> "Remote document id").required(true))
        .arg(clap::arg!(--parent <NAME> "Name of the parent page").required(true))
        .arg(clap::arg!(--token <TOKEN> "API token"))
        .arg(
            clap::arg!(--"out-dir" <DIR> "Directory the HTML files are written to")
                .default_value("html_pages")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--"links-file" <FILE> "File listing the download links")
                .default_value("download_links.txt")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"base-url" <URL> "API base URL"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"poll-interval" <SECS> "Seconds between export status checks").default_value("1"))
        .arg(clap::arg!(--"max-attempts" <NUM> "Status checks per page before giving up").default_value("60"));

    let mut cmd = clap::Command::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert HTML pages into rich-text document JSON")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(convert)
        .subcommand(export);

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "quire", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "quire", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "quire", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "quire", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
