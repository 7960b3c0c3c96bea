use blockfall::types::RestartPolicy;
use blockfall::GameConfig;

#[test]
fn config_reads_blockfall_keys_only() {
    let cfg = GameConfig::from_lookup(|key| match key {
        "BLOCKFALL_SEED" => Some("31337".to_string()),
        "BLOCKFALL_RESTART" => Some("GAME-OVER".to_string()),
        "TETRIS_SEED" => Some("1".to_string()),
        _ => None,
    });
    assert_eq!(cfg.seed, 31337);
    assert_eq!(cfg.restart_policy, RestartPolicy::GameOverOnly);
    assert_eq!(cfg.drop_ms, 300);
}

#[test]
fn same_seed_gives_same_game() {
    use blockfall::core::GameSession;

    let cfg = GameConfig::from_lookup(|key| (key == "BLOCKFALL_SEED").then(|| "9".to_string()));
    let mut a = GameSession::new(cfg.seed);
    let mut b = GameSession::new(cfg.seed);
    for _ in 0..500 {
        a.tick();
        b.tick();
    }
    assert_eq!(a.render_state(), b.render_state());
}
