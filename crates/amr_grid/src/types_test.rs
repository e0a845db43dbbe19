use super::*;

#[test]
fn test_child_pos_all_counts() {
  assert_eq!(ChildPos::all::<1>().count(), 2);
  assert_eq!(ChildPos::all::<2>().count(), 4);
  assert_eq!(ChildPos::all::<3>().count(), 8);
}

/// Bit d of the position selects the positive half along axis d.
#[test]
fn test_child_pos_axis_bits() {
  let p = ChildPos::new::<3>(5); // 0b101
  assert!(p.is_positive(0));
  assert!(!p.is_positive(1));
  assert!(p.is_positive(2));
}

#[test]
#[should_panic(expected = "out of range")]
fn test_child_pos_out_of_range_panics() {
  let _ = ChildPos::new::<2>(4);
}

#[test]
fn test_node_idx_ordering() {
  assert!(NodeIdx(1) < NodeIdx(2));
  assert_eq!(NodeIdx(7).index(), 7);
  assert_eq!(NodeIdx(3).to_string(), "#3");
}
