use std::rc::Rc;

use super::*;
use crate::surface::Surface;

#[test]
fn disposing_every_surface_passes_the_check() {
    let registry = Rc::new(SurfaceRegistry::new());
    let mut a = Surface::new(4, 4).unwrap().tracked(&registry);
    let mut b = Surface::new(2, 3).unwrap().tracked(&registry);

    let st = registry.stats();
    assert_eq!(st.live_surfaces, 2);
    assert_eq!(st.live_bytes, 4 * 4 * 4 + 2 * 3 * 4);

    a.dispose();
    b.dispose();
    registry.check_disposed().unwrap();
    assert_eq!(registry.stats().disposed, 2);
    assert_eq!(registry.stats().live_bytes, 0);
}

#[test]
fn leaked_surface_is_reported_by_id() {
    let registry = Rc::new(SurfaceRegistry::new());
    let mut kept = Surface::new(4, 4).unwrap().tracked(&registry);
    let leaked = Surface::new(4, 4).unwrap().tracked(&registry);

    kept.dispose();
    assert_eq!(registry.live(), vec![leaked.id()]);
    let err = registry.check_disposed().unwrap_err();
    assert!(matches!(err, PixtileError::State(_)));
    assert!(err.to_string().contains(&leaked.id().to_string()));
    drop(leaked);
}

#[test]
fn clear_resets_tracking() {
    let registry = Rc::new(SurfaceRegistry::new());
    let _s = Surface::new(1, 1).unwrap().tracked(&registry);
    registry.clear();
    registry.check_disposed().unwrap();
    assert_eq!(registry.stats(), RegistryStats::default());
}

#[test]
fn double_dispose_counts_once() {
    let registry = Rc::new(SurfaceRegistry::new());
    let mut s = Surface::new(1, 1).unwrap().tracked(&registry);
    s.dispose();
    s.dispose();
    assert_eq!(registry.stats().disposed, 1);
}
