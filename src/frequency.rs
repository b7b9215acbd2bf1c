use std::collections::BTreeMap;

use crate::symbol::Symbol;

/// Symbol occurrence counts, ordered by symbol.
pub type FreqTable<S> = BTreeMap<S, u64>;

pub fn count_frequencies<S: Symbol>(input: &[S]) -> FreqTable<S> {
    let mut freq = FreqTable::new();
    for &symbol in input {
        *freq.entry(symbol).or_insert(0) += 1;
    }
    freq
}

/// Folds the counts of one input shard into `into`.
pub fn merge_frequencies<S: Symbol>(into: &mut FreqTable<S>, shard: &FreqTable<S>) {
    for (&symbol, &count) in shard {
        *into.entry(symbol).or_insert(0) += count;
    }
}

/// Shannon entropy of the distribution in bits per symbol.
pub fn entropy_from_freq<S: Symbol>(freq: &FreqTable<S>) -> f64 {
    let total: u64 = freq.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;

    freq.values()
        .map(|&count| {
            let p = count as f64 / total_f;
            -p * p.log2()
        })
        .sum::<f64>()
        .max(0.0)
}
