use lumina_core::catalog::{Catalog, TileCatalogEntry, TileId, TileSize};
use lumina_core::grid::{pack, GridSpec};
use lumina_core::layout::{resolve, CellPlacement, LayoutConfig};

fn id(s: &str) -> TileId {
    TileId::new(s)
}

fn states(catalog: &Catalog) -> Vec<Option<TileId>> {
    std::iter::once(None)
        .chain(catalog.ids().into_iter().map(Some))
        .collect()
}

/// A three-tile catalog unrelated to the shipped fixture.
fn small_catalog() -> Catalog {
    let template = Catalog::builtin().iter().next().cloned().unwrap();
    let tile = |name: &str, size: TileSize, expanded: Option<(u16, u16)>| TileCatalogEntry {
        id: id(name),
        title: name.to_uppercase(),
        size,
        expanded_cols: expanded.map(|(c, _)| c),
        expanded_rows: expanded.map(|(_, r)| r),
        expands: true,
        ..template.clone()
    };
    Catalog::new(vec![
        tile("alpha", TileSize::Large, Some((3, 2))),
        tile("beta", TileSize::ExtraWide, None),
        tile("gamma", TileSize::Tall, Some((2, 3))),
    ])
}

fn assert_total(catalog: &Catalog, config: &LayoutConfig) {
    for selected in states(catalog) {
        let resolved = resolve(catalog, config, selected.as_ref());
        assert_eq!(resolved.len(), catalog.len());
        let ids: Vec<_> = resolved.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(ids, catalog.ids(), "state {selected:?}");
        assert!(resolved.iter().all(|(_, p)| p.cols >= 1 && p.rows >= 1));

        let grid = pack(&resolved, &GridSpec::default());
        assert_eq!(grid.tiles.len(), catalog.len(), "state {selected:?}");
    }
}

#[test]
fn every_tile_gets_exactly_one_placement_in_every_state() {
    assert_total(&Catalog::builtin(), &LayoutConfig::builtin());
}

#[test]
fn hand_built_catalog_is_placed_in_every_state() {
    let catalog = small_catalog();
    assert_total(&catalog, &LayoutConfig::default());
    assert_total(&catalog, &LayoutConfig::builtin());

    let open = resolve(&catalog, &LayoutConfig::default(), Some(&id("gamma")));
    assert_eq!(open.get("gamma"), Some(&CellPlacement::span(2, 3)));
    assert_eq!(open.get("alpha"), Some(&CellPlacement::span(1, 1)));
}

#[test]
fn tables_naming_unknown_tiles_still_place_every_tile() {
    let catalog = small_catalog();
    let mut config = LayoutConfig::from_toml_str(
        r#"
        [default]
        ghost = { cols = 2, rows = 2, col_start = 1, row_start = 1 }
        alpha = { cols = 2, rows = 1 }

        [beta]
        beta = { cols = 4, rows = 2, col_start = 1, row_start = 1 }
        phantom = { cols = 1, rows = 1 }

        [nowhere]
        alpha = { cols = 5, rows = 3 }
        "#,
    )
    .unwrap();
    assert!(!config.validate(&catalog).is_empty());
    assert_total(&catalog, &config);

    let idle = resolve(&catalog, &config, None);
    assert!(idle.get("ghost").is_none());
    assert_eq!(idle.get("alpha"), Some(&CellPlacement::span(2, 1)));
    let open = resolve(&catalog, &config, Some(&id("beta")));
    assert!(open.get("phantom").is_none());
    assert_eq!(open.get("beta"), Some(&CellPlacement::span(4, 2).at(1, 1)));
}

#[test]
fn resolve_is_idempotent() {
    let catalog = Catalog::builtin();
    let config = LayoutConfig::builtin();
    for selected in states(&catalog) {
        let a = resolve(&catalog, &config, selected.as_ref());
        let b = resolve(&catalog, &config, selected.as_ref());
        assert_eq!(a, b);
    }
}

#[test]
fn empty_table_falls_back_to_sizes() {
    let catalog = Catalog::builtin();
    let config = LayoutConfig::default();

    let idle = resolve(&catalog, &config, None);
    for tile in catalog.iter() {
        let (cols, rows) = tile.size.span();
        assert_eq!(idle.get(tile.id.as_str()), Some(&CellPlacement::span(cols, rows)));
    }

    let open = resolve(&catalog, &config, Some(&id("intro")));
    assert_eq!(open.get("intro"), Some(&CellPlacement::span(4, 2)));
    for tile in catalog.iter().filter(|t| t.id.as_str() != "intro") {
        assert_eq!(open.get(tile.id.as_str()), Some(&CellPlacement::span(1, 1)));
    }
}

#[test]
fn default_table_never_applies_to_an_open_tile() {
    let catalog = Catalog::builtin();
    let mut config = LayoutConfig::builtin();
    config.expanded.remove(&id("blog"));

    let resolved = resolve(&catalog, &config, Some(&id("blog")));
    let blog = catalog.get("blog").unwrap();
    assert_eq!(
        resolved.get("blog"),
        Some(&CellPlacement::span(
            blog.expanded_cols.unwrap_or(4),
            blog.expanded_rows.unwrap_or(2)
        ))
    );
    assert_eq!(resolved.get("intro"), Some(&CellPlacement::span(1, 1)));
}

#[test]
fn switching_lands_directly_on_the_new_state() {
    let catalog = Catalog::builtin();
    let config = LayoutConfig::builtin();
    let spec = GridSpec::default();

    let direct = pack(&resolve(&catalog, &config, Some(&id("gallery"))), &spec);
    let via_blog = {
        let _ = pack(&resolve(&catalog, &config, Some(&id("blog"))), &spec);
        pack(&resolve(&catalog, &config, Some(&id("gallery"))), &spec)
    };
    assert_eq!(direct, via_blog);
    assert!(direct.tiles.iter().all(|t| t.cols >= 1 && t.rows >= 1));
}

#[test]
fn user_table_overrides_builtin() {
    let catalog = Catalog::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.toml");
    std::fs::write(
        &path,
        r#"
        [intro]
        intro = { cols = 5, rows = 3, col_start = 1, row_start = 1 }
        "#,
    )
    .unwrap();

    let config = LayoutConfig::load_or_builtin(&path);
    let resolved = resolve(&catalog, &config, Some(&id("intro")));
    assert_eq!(resolved.get("intro"), Some(&CellPlacement::span(5, 3).at(1, 1)));
    // Tiles missing from the user's state table minimize.
    assert_eq!(resolved.get("blog"), Some(&CellPlacement::span(1, 1)));
}

#[test]
fn broken_layout_file_keeps_builtin_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.toml");
    std::fs::write(&path, "[intro\nnot toml").unwrap();
    let config = LayoutConfig::load_or_builtin(&path);
    assert_eq!(config, LayoutConfig::builtin());
}
