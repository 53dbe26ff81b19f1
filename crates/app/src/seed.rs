use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Where the run seed came from, kept for the startup log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedSource {
    Flag(u64),
    Runtime(u64),
}

impl SeedSource {
    pub fn value(self) -> u64 {
        match self {
            Self::Flag(seed) | Self::Runtime(seed) => seed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Flag(_) => "--seed",
            Self::Runtime(_) => "runtime",
        }
    }
}

static RUNTIME_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0_u128, |elapsed| elapsed.as_nanos());
    let counter = RUNTIME_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
    let entropy = (nanos as u64)
        ^ ((nanos >> 64) as u64)
        ^ u64::from(process::id()).rotate_left(17)
        ^ counter.rotate_left(7);
    splitmix(entropy)
}

/// Reads `--seed N` or `--seed=N` from `args` (program name first). Other arguments are ignored.
pub fn resolve_seed_from_args(args: &[String], runtime_seed: u64) -> Result<SeedSource, String> {
    let mut found = None;
    let mut rest = args.iter().skip(1);

    while let Some(argument) = rest.next() {
        let raw = if argument == "--seed" {
            rest.next().map(String::as_str).ok_or_else(|| "missing value for --seed".to_string())?
        } else if let Some(inline) = argument.strip_prefix("--seed=") {
            inline
        } else {
            continue;
        };
        if found.replace(parse_seed(raw)?).is_some() {
            return Err("--seed given more than once".to_string());
        }
    }

    Ok(found.map_or(SeedSource::Runtime(runtime_seed), SeedSource::Flag))
}

fn parse_seed(raw: &str) -> Result<u64, String> {
    raw.parse::<u64>().map_err(|_| format!("seed '{raw}' is not a non-negative number"))
}

fn splitmix(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn falls_back_to_runtime_seed() {
        let source =
            resolve_seed_from_args(&args(&["cursed-tower"]), 77).expect("no flag is fine");
        assert_eq!(source, SeedSource::Runtime(77));
        assert_eq!(source.label(), "runtime");
    }

    #[test]
    fn accepts_both_flag_spellings() {
        let split = resolve_seed_from_args(&args(&["cursed-tower", "--seed", "4242"]), 1)
            .expect("split form");
        let inline = resolve_seed_from_args(&args(&["cursed-tower", "--seed=4242"]), 1)
            .expect("inline form");
        assert_eq!(split, SeedSource::Flag(4_242));
        assert_eq!(inline, split);
    }

    #[test]
    fn ignores_unrelated_arguments() {
        let source = resolve_seed_from_args(&args(&["cursed-tower", "--fullscreen", "--seed=9"]), 1)
            .expect("valid");
        assert_eq!(source.value(), 9);
    }

    #[test]
    fn rejects_missing_bad_or_repeated_values() {
        let missing =
            resolve_seed_from_args(&args(&["cursed-tower", "--seed"]), 1).expect_err("missing");
        assert!(missing.contains("missing"), "{missing}");
        let bad =
            resolve_seed_from_args(&args(&["cursed-tower", "--seed=-3"]), 1).expect_err("negative");
        assert!(bad.contains("number"), "{bad}");
        let twice = resolve_seed_from_args(&args(&["cursed-tower", "--seed=1", "--seed", "2"]), 1)
            .expect_err("twice");
        assert!(twice.contains("more than once"), "{twice}");
    }

    #[test]
    fn runtime_seeds_differ_between_calls() {
        assert_ne!(generate_runtime_seed(), generate_runtime_seed());
    }
}
