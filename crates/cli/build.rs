use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("sitelex")
        .version("1.0.0")
        .author("Sitelex Contributors")
        .about("Audit the content corpus of a static site")
        .arg(clap::arg!([ROOT] "Site source directory to audit").default_value("src"))
        .arg(
            clap::arg!(-o --output <FILE> "JSON report path; the text report is written next to it")
                .value_name("FILE")
                .default_value("content-audit.json")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--stdout "Print the JSON report to stdout"))
        .arg(clap::arg!(--origin <URL> "Site origin used to classify links").default_value("https://example.com"))
        .arg(clap::arg!(--"min-doc-freq" <NUM> "Minimum document frequency for scored terms").default_value("2"))
        .arg(clap::arg!(--top <NUM> "Number of ranked terms per n-gram order").default_value("40"))
        .arg(clap::arg!(--workers <NUM> "Worker threads for per-document analysis").default_value("8"))
        .arg(clap::arg!(--"min-words" <NUM> "Minimum word count for keyword samples").default_value("150"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_name("SHELL")
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "sitelex", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "sitelex", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "sitelex", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "sitelex", &completions_dir).unwrap();

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
