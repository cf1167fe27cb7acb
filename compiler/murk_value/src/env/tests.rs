use super::*;
use pretty_assertions::assert_eq;

fn n(s: &str) -> Name {
    Name::intern(s)
}

#[test]
fn define_and_lookup() {
    let env = Environment::new();
    env.define(n("x"), Value::int(1));
    assert_eq!(env.lookup(n("x")), Some(Value::int(1)));
    assert_eq!(env.lookup(n("y")), None);
}

#[test]
fn lookup_walks_parents_and_children_shadow() {
    let root = Environment::new();
    root.define(n("x"), Value::int(1));
    root.define(n("y"), Value::int(2));

    let inner = root.child();
    inner.define(n("x"), Value::int(10));

    assert_eq!(inner.lookup(n("x")), Some(Value::int(10)));
    assert_eq!(inner.lookup(n("y")), Some(Value::int(2)));
    assert_eq!(root.lookup(n("x")), Some(Value::int(1)));
}

#[test]
fn bind_root_reaches_the_outermost_scope() {
    let root = Environment::new();
    let deep = root.child().child().child();
    deep.bind_root(n("g"), Value::string("global"));
    assert_eq!(root.lookup(n("g")), Some(Value::string("global")));
    assert_eq!(deep.depth(), 4);
    assert!(deep.root().ptr_eq(&root));
}

#[test]
fn assign_updates_innermost_binding() {
    let root = Environment::new();
    root.define(n("counter"), Value::int(0));
    let inner = root.child();

    assert_eq!(inner.assign(n("counter"), Value::int(5)), Ok(()));
    assert_eq!(root.lookup(n("counter")), Some(Value::int(5)));
    assert_eq!(
        inner.assign(n("missing"), Value::Nil),
        Err(AssignError::Unbound)
    );
}

#[test]
fn constants_reject_assignment() {
    let env = Environment::new();
    env.define_with(n("half"), Value::float(2.5), Mutability::Immutable);
    assert_eq!(
        env.assign(n("half"), Value::int(3)),
        Err(AssignError::Immutable)
    );
    assert_eq!(env.lookup(n("half")), Some(Value::float(2.5)));
}

#[test]
fn purity_is_inherited_and_permanent() {
    let root = Environment::new();
    let before = root.child();
    assert!(!root.is_pure());

    let pure = root.pure_child();
    assert!(pure.is_pure());
    assert!(pure.child().is_pure());
    assert!(!root.is_pure());

    // Marking an ancestor later also affects existing descendants.
    root.mark_pure();
    assert!(before.is_pure());
}

#[test]
fn many_bindings_switch_to_a_map() {
    let env = Environment::new();
    for i in 0..(INLINE_BINDINGS as i64 * 3) {
        env.define(n(&format!("v{i}")), Value::int(i));
    }
    assert_eq!(env.local_len(), INLINE_BINDINGS * 3);
    assert!(matches!(*env.0.bindings.read(), Bindings::Map(_)));
    for i in 0..(INLINE_BINDINGS as i64 * 3) {
        assert_eq!(env.lookup(n(&format!("v{i}"))), Some(Value::int(i)));
    }

    // Redefinition replaces rather than duplicates.
    env.define(n("v0"), Value::Nil);
    assert_eq!(env.local_len(), INLINE_BINDINGS * 3);
    assert_eq!(env.lookup(n("v0")), Some(Value::Nil));
}

#[test]
fn checked_definitions_keep_constants() {
    let root = Environment::new();
    let inner = root.child();
    inner.bind_root_with(n("limit"), Value::int(10), Mutability::Immutable);
    assert_eq!(
        inner.try_bind_root_with(n("limit"), Value::int(11), Mutability::Mutable),
        Err(AssignError::Immutable)
    );
    assert_eq!(
        inner.try_bind_root_with(n("fresh"), Value::int(1), Mutability::Mutable),
        Ok(())
    );
    assert_eq!(root.lookup(n("limit")), Some(Value::int(10)));
    assert_eq!(root.lookup(n("fresh")), Some(Value::int(1)));
}
