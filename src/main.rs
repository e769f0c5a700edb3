use std::io::{self, BufRead};
use std::process;

use clap::{App, Arg, ArgGroup};
use log::{error, info};
use separator::Separatable;

use search_client::config::Method;
use search_client::level::Level;
use search_client::memory::MemoryTracker;
use search_client::parser;
use search_client::protocol;
use search_client::search::{self, Outcome, Strategy};

fn main() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let matches = App::new("search-client")
        .about("Graph-search client for grid warehouse levels, speaking the executor protocol on stdin/stdout")
        .arg(Arg::with_name("bfs")
            .long("--bfs")
            .help("breadth-first strategy (default)"))
        .arg(Arg::with_name("dfs")
            .long("--dfs")
            .help("depth-first strategy"))
        .arg(Arg::with_name("greedy")
            .long("--greedy")
            .help("best-first strategy, greedy evaluation"))
        .arg(Arg::with_name("astar")
            .long("--astar")
            .help("best-first strategy, A* evaluation"))
        .arg(Arg::with_name("wastar")
            .long("--wastar")
            .help("best-first strategy, weighted A* evaluation"))
        .group(ArgGroup::with_name("strategy")
            .arg("bfs")
            .arg("dfs")
            .arg("greedy")
            .arg("astar")
            .arg("wastar"))
        .arg(Arg::with_name("weight")
            .short("-w")
            .long("--weight")
            .takes_value(true)
            .default_value("5")
            .help("weight for --wastar, must be positive"))
        .arg(Arg::with_name("max-memory")
            .long("--max-memory")
            .takes_value(true)
            .default_value("512")
            .help("soft memory ceiling in MB"))
        .arg(Arg::with_name("stats")
            .long("--stats")
            .help("print the per-depth statistics table after the search"))
        .get_matches();

    let weight: f64 = matches
        .value_of("weight")
        .unwrap()
        .parse()
        .unwrap_or_else(|err| {
            error!("Invalid weight: {}", err);
            process::exit(1);
        });
    if weight <= 0.0 {
        error!("Invalid weight: must be positive");
        process::exit(1);
    }

    let max_memory: f64 = matches
        .value_of("max-memory")
        .unwrap()
        .parse()
        .unwrap_or_else(|err| {
            error!("Invalid memory ceiling: {}", err);
            process::exit(1);
        });

    let method = if matches.is_present("dfs") {
        Method::DepthFirst
    } else if matches.is_present("greedy") {
        Method::Greedy
    } else if matches.is_present("astar") {
        Method::AStar
    } else if matches.is_present("wastar") {
        Method::WeightedAStar(weight)
    } else {
        Method::BreadthFirst
    };

    let memory = MemoryTracker::with_ceiling(max_memory);

    // the level arrives on stdin and the same stream later carries the
    // executor's acknowledgements
    let stdin = io::stdin();
    let mut server = stdin.lock();

    info!("Search client initializing");

    let level = read_level(&mut server);

    let mut strategy = Strategy::from_method(method, &level);
    info!("Starting search with strategy {}", strategy);

    let result = search::search(&level, &mut strategy, &memory).unwrap_or_else(|err| {
        error!("Search aborted: {}", err);
        process::exit(1);
    });

    info!("{}", strategy.search_status(&memory));
    if matches.is_present("stats") {
        eprintln!("{}", result.stats.depth_table());
    }

    match result.outcome {
        Outcome::Solved(plan) => {
            info!("Found solution of length {}", (plan.len() as u64).separated_string());

            let stdout = io::stdout();
            let mut out = stdout.lock();
            let executed =
                protocol::execute_plan(&plan, &mut server, &mut out).unwrap_or_else(|err| {
                    error!("Protocol failure: {}", err);
                    process::exit(1);
                });
            if executed < plan.len() {
                info!("Executor accepted {} of {} actions", executed, plan.len());
            }
        }
        Outcome::Exhausted => {
            // a normal negative result, not a crash - exit status stays 0
            info!("Unable to solve level: explored the whole state space");
        }
        Outcome::ResourceExceeded => {
            info!("Unable to solve level: maximum memory usage exceeded");
        }
    }
}

fn read_level<R: BufRead>(server: &mut R) -> Level {
    let text = parser::read_level(server).unwrap_or_else(|err| {
        error!("Can't read level: {}", err);
        process::exit(1);
    });
    text.parse().unwrap_or_else(|err| {
        error!("Error parsing level: {}", err);
        process::exit(1);
    })
}
