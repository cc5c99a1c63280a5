use clap::Parser;

/// Statistics and charts of the map karma of a mapping competition.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the settings of the analysis. See the manual for the
    /// list of options. The other command line options override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, default Karma_RHQBonkCup.xlsx) The spreadsheet with the karma of every map.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default xlsx) The type of the input: xlsx or csv.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (directory, default .) Where the charts mapCount.svg and mapperRating.svg are written.
    #[clap(short = 'd', long, value_parser)]
    pub output_dir: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the analysis will be written in JSON
    /// format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of an analysis in JSON format. If provided,
    /// karmastats will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, authors without a rating and empty best/worst map searches stop the
    /// program instead of being reported.
    #[clap(long, takes_value = false)]
    pub strict: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
