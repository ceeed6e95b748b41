// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("ratedesk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rate desk for a vacation-rental marketplace: resolve legacy tariffs, manage margins, approve listings")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(property_cmd())
        .subcommand(rates_cmd())
        .subcommand(import_cmd())
        .subcommand(export_cmd())
        .subcommand(fetch_cmd())
        .subcommand(config_cmd())
        .subcommand(Command::new("doctor").about("Check the catalog for pricing problems"))
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Property id")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print JSON Lines"),
    )
}

fn property_cmd() -> Command {
    Command::new("property")
        .about("Manage the property catalog")
        .subcommand(
            Command::new("add")
                .about("Add a property")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("Villa")
                        .help("Villa or Waterpark"),
                )
                .arg(Arg::new("location").long("location"))
                .arg(Arg::new("city").long("city"))
                .arg(Arg::new("price").long("price").help("Base nightly price"))
                .arg(
                    Arg::new("price-mon-thu")
                        .long("price-mon-thu")
                        .help("Mon-Thu tariff"),
                )
                .arg(
                    Arg::new("price-fri-sun")
                        .long("price-fri-sun")
                        .help("Fri and Sun tariff"),
                )
                .arg(Arg::new("price-sat").long("price-sat").help("Sat tariff"))
                .arg(
                    Arg::new("guests")
                        .long("guests")
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("rooms")
                        .long("rooms")
                        .value_parser(value_parser!(i64)),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List properties")
                .arg(Arg::new("type").long("type").help("Filter by property type"))
                .arg(Arg::new("city").long("city").help("Filter by city"))
                .arg(
                    Arg::new("pending")
                        .long("pending")
                        .action(ArgAction::SetTrue)
                        .help("Only properties awaiting approval"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_flags(
            Command::new("show").about("Show one property").arg(id_arg()),
        ))
        .subcommand(Command::new("rm").about("Remove a property").arg(id_arg()))
        .subcommand(
            Command::new("approve")
                .about("Approve a property, bootstrapping its rate matrix if needed")
                .arg(id_arg()),
        )
}

fn rates_cmd() -> Command {
    Command::new("rates")
        .about("Resolve and edit a property's pricing matrix")
        .subcommand(json_flags(
            Command::new("show")
                .about("Resolved rate matrix for a property")
                .arg(id_arg()),
        ))
        .subcommand(
            Command::new("set")
                .about("Edit one field of one cell; the derived fields recompute")
                .arg(id_arg())
                .arg(
                    Arg::new("day")
                        .long("day")
                        .help("monday..sunday (villa categories only)"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("villa|extra_person|meal_person|jain_meal_person, or adult_weekday|adult_weekend|child_weekday|child_weekend"),
                )
                .arg(
                    Arg::new("field")
                        .long("field")
                        .required(true)
                        .help("current|discounted|final|discount|margin"),
                )
                .arg(Arg::new("value").long("value").required(true)),
        )
        .subcommand(
            Command::new("flatten")
                .about("Set one villa category to a single vendor ask across all days")
                .arg(id_arg())
                .arg(Arg::new("category").long("category").default_value("villa"))
                .arg(Arg::new("value").long("value").required(true)),
        )
        .subcommand(
            Command::new("quote")
                .about("Customer-facing display price for a calendar date")
                .arg(id_arg())
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                ),
        )
}

fn import_cmd() -> Command {
    Command::new("import")
        .about("Import properties")
        .subcommand(
            Command::new("properties")
                .about("Import properties from CSV (name,type,location,city,price,price_mon_thu,price_fri_sun,price_sat,guests,rooms)")
                .arg(Arg::new("path").long("path").required(true)),
        )
        .subcommand(
            Command::new("dump")
                .about("Import a JSON dump from the marketplace backend")
                .arg(Arg::new("path").long("path").required(true)),
        )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export catalog data")
        .subcommand(
            Command::new("properties")
                .about("Export the property catalog")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("rates")
                .about("Export one property's resolved rate matrix as JSON")
                .arg(id_arg())
                .arg(Arg::new("out").long("out").required(true)),
        )
}

fn fetch_cmd() -> Command {
    Command::new("fetch")
        .about("Pull property records from the marketplace API")
        .subcommand(
            Command::new("property")
                .about("Fetch a single property by marketplace id")
                .arg(id_arg()),
        )
        .subcommand(Command::new("pending").about("Fetch all properties awaiting approval"))
}

fn config_cmd() -> Command {
    Command::new("config")
        .about("Local configuration")
        .subcommand(
            Command::new("set-api")
                .about("Set the marketplace API endpoint")
                .arg(Arg::new("url").long("url").required(true))
                .arg(Arg::new("token").long("token").help("Bearer token")),
        )
        .subcommand(Command::new("show").about("Show configuration"))
}
