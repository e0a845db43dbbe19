use super::*;
use crate::tree::{relations::child_geometry, InterleavedLocation};
use crate::types::ChildPos;

// =========================================================================
// Validation
// =========================================================================

#[test]
fn test_default_is_valid() {
  assert_eq!(GridConfig::default().validate(), Ok(()));
}

#[test]
fn test_validate_rejects_bad_fields() {
  let odd = GridConfig {
    internal_cells: 5,
    ..Default::default()
  };
  assert_eq!(odd.validate(), Err(ConfigError::InvalidInternalCells(5)));

  let zero = GridConfig {
    internal_cells: 0,
    ..Default::default()
  };
  assert_eq!(zero.validate(), Err(ConfigError::InvalidInternalCells(0)));

  let no_halo = GridConfig {
    halo_layers: 0,
    ..Default::default()
  };
  assert!(matches!(no_halo.validate(), Err(ConfigError::InvalidHaloLayers { .. })));

  let wide_halo = GridConfig {
    halo_layers: 5,
    ..Default::default()
  };
  assert_eq!(
    wide_halo.validate(),
    Err(ConfigError::InvalidHaloLayers {
      halo_layers: 5,
      internal_cells: 4
    })
  );

  let no_vars = GridConfig {
    variables: 0,
    ..Default::default()
  };
  assert_eq!(no_vars.validate(), Err(ConfigError::NoVariables));

  let bad_length = GridConfig {
    root_length: f64::NAN,
    ..Default::default()
  };
  assert!(matches!(bad_length.validate(), Err(ConfigError::InvalidRootLength(_))));
}

#[test]
fn test_config_error_messages() {
  let msg = ConfigError::InvalidHaloLayers {
    halo_layers: 7,
    internal_cells: 4,
  }
  .to_string();
  assert!(msg.contains("1..=4"), "{}", msg);
  assert!(msg.contains('7'), "{}", msg);
}

// =========================================================================
// Coordinate math
// =========================================================================

/// Node length halves with each level.
#[test]
fn test_node_length_halves_per_level() {
  let config = GridConfig {
    root_length: 8.0,
    ..Default::default()
  };
  assert_eq!(config.node_length(0), 8.0);
  assert_eq!(config.node_length(1), 4.0);
  assert_eq!(config.node_length(3), 1.0);
  assert_eq!(config.cell_length(1), 1.0);
}

#[test]
fn test_node_min_offsets_by_origin() {
  let config = GridConfig {
    origin: DVec3::new(10.0, -2.0, 0.0),
    root_length: 4.0,
    ..Default::default()
  };
  let location = InterleavedLocation::<2>::from_coordinates([3, 1], 2);
  assert_eq!(config.node_min::<2, _>(&location), DVec3::new(13.0, -1.0, 0.0));
  assert_eq!(config.node_centroid::<2, _>(&location), DVec3::new(13.5, -0.5, 0.0));
}

/// Child boxes from the config agree with the relative child geometry.
#[test]
fn test_node_box_matches_child_geometry() {
  let config = GridConfig {
    origin: DVec3::new(-1.0, -1.0, -1.0),
    root_length: 2.0,
    ..Default::default()
  };
  let root = InterleavedLocation::<3>::root();
  let root_box = config.node_box::<3, _>(&root);
  assert_eq!(root_box.centroid, DVec3::ZERO);

  for position in ChildPos::all::<3>() {
    let child = root.child(position).unwrap();
    let expected = child_geometry::<3, _>(position, &root_box);
    let actual = config.node_box::<3, _>(&child);
    assert!((actual.centroid - expected.centroid).length() < 1e-12);
    assert_eq!(actual.length, expected.length);
  }
}

#[test]
fn test_layout_from_config() {
  let config = GridConfig {
    internal_cells: 8,
    halo_layers: 2,
    ..Default::default()
  };
  let layout = config.layout::<2>();
  assert_eq!(layout.cells_per_length(), 12);
  assert_eq!(layout.size(), 144);
}
