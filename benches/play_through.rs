//! Full simulated games: deal, open with one miss, then flip every pair.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use memory_match::core::{CardIndex, EngineConfig};
use memory_match::deck::{DeckRequest, Theme, ThemeDeckProvider};
use memory_match::engine::MatchEngine;
use memory_match::events::NullSink;

fn play_one(engine: &mut MatchEngine<NullSink>, provider: &mut ThemeDeckProvider) {
    engine
        .start_game_from(provider, &DeckRequest::new(Theme::Emoji))
        .unwrap();

    let board = engine.session().unwrap().board().clone();

    // Opening miss: the first card and the first card not sharing its symbol.
    let other = (1..board.len())
        .find(|&k| board[k].symbol != board[0].symbol)
        .unwrap();
    engine.select_card(CardIndex::new(0)).unwrap();
    engine.select_card(CardIndex::new(other)).unwrap();
    engine.run_until_idle();

    // Perfect recall: pair positions by symbol.
    let mut done = vec![false; board.len()];
    for i in 0..board.len() {
        if done[i] {
            continue;
        }
        let j = (i + 1..board.len())
            .find(|&j| board[j].symbol == board[i].symbol)
            .unwrap();
        done[i] = true;
        done[j] = true;

        engine.select_card(CardIndex::new(i)).unwrap();
        engine.select_card(CardIndex::new(j)).unwrap();
        engine.run_until_idle();
    }
    assert!(engine.is_won());
}

fn bench_play_through(c: &mut Criterion) {
    let mut engine = MatchEngine::with_sink(EngineConfig::default(), NullSink).unwrap();
    let mut provider = ThemeDeckProvider::new(42);

    c.bench_function("play_through_8_pairs", |b| {
        b.iter(|| play_one(black_box(&mut engine), &mut provider));
    });
}

criterion_group!(benches, bench_play_through);
criterion_main!(benches);
