/**
 * UUCF
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

extern crate env_logger;
extern crate getopts;
#[macro_use]
extern crate log;
extern crate num_cpus;
extern crate uucf;

use std::env;
use std::error::Error;
use std::io::Write;
use std::process;

use getopts::Options;

use uucf::batch;
use uucf::io;
use uucf::recommend;
use uucf::{ScorerConfig, UserUserScorer, DEFAULT_NEIGHBOR_COUNT};

fn main() {

    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("i", "inputfile", "Input file name (required). The input consists of ratings \
        which users gave to items. The input file must contain a user, item and rating triple per \
        line, separated by tabs.", "PATH");
    opts.optopt("o", "outputfile", "Output file name (optional, output will be written to stdout \
        by default).", "PATH");
    opts.optopt("n", "num-neighbors", "Number of most similar users to consider per item \
        (optional, defaults to 30).", "NUMBER");
    opts.optopt("r", "recommend", "Recommend this many unrated items per queried user instead of \
        scoring the queried items (optional).", "NUMBER");
    opts.optopt("t", "threads", "Number of threads to score with (optional, defaults to the \
        number of CPUs).", "NUMBER");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, opts, None);
    }

    let ratings_path = match matches.opt_str("i") {
        Some(ratings_path) => ratings_path,
        None => return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify an inputfile via --inputfile."),
        ),
    };

    if matches.free.is_empty() {
        return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify at least one query of the form USER:ITEM[,ITEM...]."),
        );
    }

    let output_path = matches.opt_str("o");

    let neighbor_count: usize = match matches.opt_get_default("n", DEFAULT_NEIGHBOR_COUNT) {
        Ok(neighbor_count) => neighbor_count,
        Err(failure) => {
            let hint = format!("Problem with option 'n': {}", failure.to_string());
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let num_recommendations: Option<usize> = match matches.opt_get("r") {
        Ok(num_recommendations) => num_recommendations,
        Err(failure) => {
            let hint = format!("Problem with option 'r': {}", failure.to_string());
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let num_threads: usize = match matches.opt_get_default("t", num_cpus::get()) {
        Ok(num_threads) => num_threads,
        Err(failure) => {
            let hint = format!("Problem with option 't': {}", failure.to_string());
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let settings = Settings {
        ratings_path,
        output_path,
        config: ScorerConfig { neighbor_count },
        num_recommendations,
        num_threads,
    };

    if let Err(failure) = run(&settings, &matches.free) {
        eprintln!("{}", failure);
        process::exit(1);
    }
}

struct Settings {
    ratings_path: String,
    output_path: Option<String>,
    config: ScorerConfig,
    num_recommendations: Option<usize>,
    num_threads: usize,
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let exit_code = if hint.is_some() { 2 } else { 0 };

    let brief = format!("Usage: {} [options] USER:ITEM[,ITEM...]...", program);
    eprint!("{}", opts.usage(&brief));
    process::exit(exit_code);
}

fn run(settings: &Settings, queries: &[String]) -> Result<(), Box<dyn Error>> {

    let requests = io::requests_from_queries(queries)?;

    info!("Reading ratings from {}", settings.ratings_path);
    let ratings = io::read_ratings(&settings.ratings_path)?;

    let scorer = UserUserScorer::with_config(&ratings, &ratings, settings.config);

    let mut out = io::output(settings.output_path.clone())?;

    match settings.num_recommendations {
        Some(num_recommendations) => {
            info!("Recommending {} items for {} users", num_recommendations, requests.len());

            for request in requests.iter() {
                let recommended_items = recommend::recommend(
                    &scorer,
                    request.user,
                    ratings.items(),
                    num_recommendations,
                )?;

                io::write_recommendations(&mut out, request.user, &recommended_items)?;
            }
            out.flush()?;
        },
        None => {
            info!("Scoring {} users with {} threads", requests.len(), settings.num_threads);

            let results = batch::score_all(&scorer, &requests, settings.num_threads)?;

            info!("Writing scores...");
            io::write_scores(&mut out, &requests, &results)?;
        },
    }

    Ok(())
}
