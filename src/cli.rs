use crate::filter::Filter;
use crate::project::DEFAULT_MAX_VALUE;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

const NEW_COMMAND: &str = "new";
const ADD_LAYER_COMMAND: &str = "add-layer";
const REMOVE_LAYER_COMMAND: &str = "remove-layer";
const ADD_IMAGE_COMMAND: &str = "add-image";
const SET_FILTER_COMMAND: &str = "set-filter";
const SAVE_IMAGE_COMMAND: &str = "save-image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    New {
        height: usize,
        width: usize,
        max_value: u16,
    },
    AddLayer {
        name: String,
    },
    RemoveLayer {
        name: String,
    },
    AddImage {
        layer: String,
        image_file: PathBuf,
        row: isize,
        col: isize,
    },
    SetFilter {
        layer: String,
        filter: Filter,
    },
    SaveImage {
        output_file: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    pub project_file: PathBuf,
    pub action: Action,
}

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_subcommands(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_subcommands(command: Command) -> Command {
        command
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommand(Self::create_new_command())
            .subcommand(Self::create_add_layer_command())
            .subcommand(Self::create_remove_layer_command())
            .subcommand(Self::create_add_image_command())
            .subcommand(Self::create_set_filter_command())
            .subcommand(Self::create_save_image_command())
    }

    fn register_project_file_argument(command: Command) -> Command {
        command.arg(Self::create_project_file_argument())
    }

    fn register_dimension_arguments(command: Command) -> Command {
        command
            .arg(Self::create_height_argument())
            .arg(Self::create_width_argument())
            .arg(Self::create_max_value_argument())
    }

    fn register_layer_argument(command: Command) -> Command {
        command.arg(Self::create_layer_argument())
    }

    fn register_placement_arguments(command: Command) -> Command {
        command
            .arg(Self::create_image_file_argument())
            .arg(Self::create_offset_argument("row", "Row of the top-left image corner"))
            .arg(Self::create_offset_argument("col", "Column of the top-left image corner"))
    }

    fn register_filter_argument(command: Command) -> Command {
        command.arg(Self::create_filter_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_new_command() -> Command {
        let command = Command::new(NEW_COMMAND).about("Create a project with a white background");
        let command = Self::register_project_file_argument(command);
        Self::register_dimension_arguments(command)
    }

    fn create_add_layer_command() -> Command {
        let command = Command::new(ADD_LAYER_COMMAND).about("Add a transparent layer on top");
        let command = Self::register_project_file_argument(command);
        Self::register_layer_argument(command)
    }

    fn create_remove_layer_command() -> Command {
        let command = Command::new(REMOVE_LAYER_COMMAND).about("Remove a layer by name");
        let command = Self::register_project_file_argument(command);
        Self::register_layer_argument(command)
    }

    fn create_add_image_command() -> Command {
        let command = Command::new(ADD_IMAGE_COMMAND).about("Place an image onto a layer");
        let command = Self::register_project_file_argument(command);
        let command = Self::register_layer_argument(command);
        Self::register_placement_arguments(command)
    }

    fn create_set_filter_command() -> Command {
        let command = Command::new(SET_FILTER_COMMAND).about("Set the filter of a layer");
        let command = Self::register_project_file_argument(command);
        let command = Self::register_layer_argument(command);
        Self::register_filter_argument(command)
    }

    fn create_save_image_command() -> Command {
        let command =
            Command::new(SAVE_IMAGE_COMMAND).about("Flatten the project and write it as an image");
        let command = Self::register_project_file_argument(command);
        Self::register_output_file_argument(command)
    }

    fn create_project_file_argument() -> Arg {
        Arg::new("project_file")
            .help("Path to the collage project file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_height_argument() -> Arg {
        arg!(height: --height <HEIGHT> "Canvas height in pixels")
            .required(true)
            .value_parser(value_parser!(usize))
    }

    fn create_width_argument() -> Arg {
        arg!(width: --width <WIDTH> "Canvas width in pixels")
            .required(true)
            .value_parser(value_parser!(usize))
    }

    fn create_max_value_argument() -> Arg {
        Arg::new("max_value")
            .short('m')
            .long("max-value")
            .value_name("MAX")
            .help("Maximum channel value")
            .default_value(DEFAULT_MAX_VALUE.to_string())
            .value_parser(value_parser!(u16).range(1..))
    }

    fn create_layer_argument() -> Arg {
        Arg::new("layer")
            .help("Name of the layer")
            .required(true)
    }

    fn create_image_file_argument() -> Arg {
        Arg::new("image_file")
            .help("Path to a PPM, PNG or JPEG image")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_offset_argument(name: &'static str, help: &'static str) -> Arg {
        Arg::new(name)
            .long(name)
            .help(help)
            .default_value("0")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(isize))
    }

    fn create_filter_argument() -> Arg {
        Arg::new("filter")
            .help("Filter identifier")
            .required(true)
            .ignore_case(true)
            .value_parser(value_parser!(Filter))
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to the output image, format chosen by extension")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        let (name, sub_matches) = matches
            .subcommand()
            .expect("Subcommand is required, but was unset");
        Arguments {
            project_file: Self::extract_project_file_argument(sub_matches),
            action: Self::extract_action(name, sub_matches),
        }
    }

    fn extract_action(name: &str, matches: &ArgMatches) -> Action {
        match name {
            NEW_COMMAND => Action::New {
                height: Self::extract_required::<usize>(matches, "height"),
                width: Self::extract_required::<usize>(matches, "width"),
                max_value: Self::extract_required::<u16>(matches, "max_value"),
            },
            ADD_LAYER_COMMAND => Action::AddLayer {
                name: Self::extract_layer_argument(matches),
            },
            REMOVE_LAYER_COMMAND => Action::RemoveLayer {
                name: Self::extract_layer_argument(matches),
            },
            ADD_IMAGE_COMMAND => Action::AddImage {
                layer: Self::extract_layer_argument(matches),
                image_file: Self::extract_required::<PathBuf>(matches, "image_file"),
                row: Self::extract_required::<isize>(matches, "row"),
                col: Self::extract_required::<isize>(matches, "col"),
            },
            SET_FILTER_COMMAND => Action::SetFilter {
                layer: Self::extract_layer_argument(matches),
                filter: Self::extract_required::<Filter>(matches, "filter"),
            },
            SAVE_IMAGE_COMMAND => Action::SaveImage {
                output_file: Self::extract_required::<PathBuf>(matches, "output_file"),
            },
            _ => unreachable!("Subcommand {} is not registered", name),
        }
    }

    fn extract_project_file_argument(matches: &ArgMatches) -> PathBuf {
        Self::extract_required::<PathBuf>(matches, "project_file")
    }

    fn extract_layer_argument(matches: &ArgMatches) -> String {
        Self::extract_required::<String>(matches, "layer")
    }

    fn extract_required<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> T {
        matches
            .get_one::<T>(id)
            .unwrap_or_else(|| panic!("Required argument {} not provided", id))
            .clone()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
