use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sixdeg")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sixdeg")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress spinner and non-essential output").required(false))
        .subcommand_required(true)
        .subcommand(
            command!("discover")
                .about(
                    "Crawl outward from seed profiles through suggested connections and \
                emit the ordered profile list for the viewer session.",
                )
                .arg(
                    arg!(-s --"seed" <ID>)
                        .required(false)
                        .help("Seed profile identifier or URL (repeatable)")
                        .action(clap::ArgAction::Append)
                        .conflicts_with("seeds-file"),
                )
                .arg(
                    arg!(-S --"seeds-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of seed identifiers")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("seed"),
                )
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("Suggestion expansion budget per branch")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("3"),
                )
                .arg(
                    arg!(-t --"term" <TERM>)
                        .required(false)
                        .help(
                            "Keyword a suggestion headline must contain to be followed \
                        (repeatable; no terms admits every headline)",
                        )
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(-b --"base" <URL>)
                        .required(false)
                        .help("Profile base URL that bare identifiers are joined onto")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(--"delay-min" <MS>)
                        .required(false)
                        .help("Minimum pause between profile visits, in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("1000"),
                )
                .arg(
                    arg!(--"delay-max" <MS>)
                        .required(false)
                        .help("Maximum pause between profile visits, in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10000"),
                )
                .arg(
                    arg!(--"proxies-from" <URL>)
                        .required(false)
                        .help(
                            "Harvest an egress proxy pool from this listing endpoint and \
                        rotate fetches through it",
                        )
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save the profile list as JSON (default: print to stdout)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            command!("proxies")
                .about(
                    "Harvest a pool of alternate egress proxies from a paginated \
                public listing.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The proxy listing endpoint")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-p --"pages" <PAGES>)
                        .required(false)
                        .help("How many listing pages to scrape")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("2"),
                )
                .arg(
                    arg!(--"tier" <TIER>)
                        .required(false)
                        .help("Anonymity tier requested from the listing")
                        .default_value("elite"),
                ),
        )
}
