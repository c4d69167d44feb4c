use clap::{App, Arg};

/// Available command line arguments
pub enum CliArg {
    Config,
    Input,
    Layout,
    ListLayouts,
    Quiet,
    Verbose,
}

impl CliArg {
    pub fn as_str(&self) -> &str {
        match self {
            &CliArg::Config => "config",
            &CliArg::Input => "input",
            &CliArg::Layout => "layout",
            &CliArg::ListLayouts => "list-layouts",
            &CliArg::Quiet => "quiet",
            &CliArg::Verbose => "verbose",
        }
    }
}

/// Construct a new clap root command
pub fn new_root_command<'a>() -> clap::App<'a, 'static> {
    let root_cmd = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .args(&[
            Arg::with_name(CliArg::Config.as_str())
                .short("c")
                .value_name("FILE")
                .help("Use a specific config file")
                .takes_value(true),
            Arg::with_name(CliArg::Input.as_str())
                .short("r")
                .value_name("FRAME-FILE")
                .help("Offline frame file, one hex encoded frame per line")
                .takes_value(true),
            Arg::with_name(CliArg::Layout.as_str())
                .short("l")
                .long("layout")
                .value_name("NAME")
                .help("Layout applied to incoming frames")
                .takes_value(true),
            Arg::with_name(CliArg::ListLayouts.as_str())
                .long("list-layouts")
                .help("List registered layouts and exit"),
            Arg::with_name(CliArg::Quiet.as_str())
                .short("q")
                .long("quiet")
                .help("Turn off diagnostic logging"),
            Arg::with_name(CliArg::Verbose.as_str())
                .short("v")
                .long("verbose")
                .help("Turn on all debugging"),
        ]);

    return root_cmd;
}
