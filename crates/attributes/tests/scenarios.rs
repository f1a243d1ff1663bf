//! End-to-end scenarios for the modifiable value engine: attribute chains,
//! derived attributes wrapping other attributes, notification accounting,
//! and bounded resources.

use std::cell::Cell;
use std::rc::Rc;

use attributes::{
    BoundedValue, Modifier, ModifiableValue, ReadValue, Value, WriteValue,
};

fn count_changes<T, V: ReadValue<T> + ?Sized>(
    value: &V,
) -> (Rc<Cell<u32>>, attributes::Subscription) {
    let count = Rc::new(Cell::new(0));
    let inner = Rc::clone(&count);
    let sub = value.subscribe(Box::new(move |_| inner.set(inner.get() + 1)));
    (count, sub)
}

#[test]
fn boost_stacks_in_insertion_order_at_equal_priority() {
    let health = ModifiableValue::new(100.0f32);
    health.modifiers().add(Modifier::times(1.10).named("boost"));
    assert_eq!(health.value(), 110.0);

    // Same default priority: applies after the first boost.
    health
        .modifiers()
        .add(Modifier::times(1.20).named("boost20"));
    assert_eq!(health.value(), 132.0);
}

#[test]
fn derived_attribute_wraps_another_attribute() {
    let health = ModifiableValue::new(100.0f32);
    health.modifiers().add(Modifier::times(1.10).named("boost"));

    let current_health = ModifiableValue::with_initial(attributes::ValueRef::reading(
        Rc::clone(&health) as Rc<dyn ReadValue<f32>>,
    ));
    let damage = Modifier::plus(0.0).named("damage");
    current_health.modifiers().add(Rc::clone(&damage));
    assert_eq!(current_health.value(), 110.0);

    let (health_changes, _g1) = count_changes(&*health);
    let (current_changes, _g2) = count_changes(&*current_health);

    damage.set_context_value(10.0).unwrap();
    assert_eq!(current_health.value(), 120.0);
    assert_eq!(health.value(), 110.0);
    assert_eq!(current_changes.get(), 1);
    assert_eq!(health_changes.get(), 0);
}

#[test]
fn priorities_override_insertion_order() {
    let armor = ModifiableValue::new(100.0f32);
    armor
        .modifiers()
        .add_with_priority(0, Modifier::times(1.10));
    armor.modifiers().add_with_priority(-10, Modifier::plus(10.0));

    // Priority -10 enumerates first: (100 + 10) * 1.10.
    assert_eq!(armor.value(), 121.0);

    let ops: Vec<char> = armor
        .modifiers()
        .snapshot()
        .iter()
        .map(|m| m.op().symbol())
        .collect();
    assert_eq!(ops, vec!['+', '*']);
}

#[test]
fn base_changes_propagate_to_the_whole_chain() {
    let health = ModifiableValue::new(100.0f32);
    health.modifiers().add(Modifier::times(1.10));
    let (changes, _guard) = count_changes(&*health);

    health.set_initial(200.0).unwrap();
    assert_eq!(health.value(), 220.0);
    assert_eq!(changes.get(), 1);

    // Writing the same base again is suppressed end to end.
    health.set_initial(200.0).unwrap();
    assert_eq!(changes.get(), 1);
}

#[test]
fn add_and_remove_notify_exactly_once_each() {
    let health = ModifiableValue::new(100.0f32);
    let boost = Modifier::times(1.10);

    // Let the modifier fire a few notifications of its own first; they must
    // not multiply the collection's structural notifications.
    boost.set_enabled(false);
    boost.set_enabled(true);

    let (changes, _guard) = count_changes(&*health);
    health.modifiers().add(Rc::clone(&boost));
    assert_eq!(changes.get(), 1);

    assert!(health.modifiers().remove(&boost));
    assert_eq!(changes.get(), 2);

    // Absent now: silent.
    assert!(!health.modifiers().remove(&boost));
    assert_eq!(changes.get(), 2);
}

#[test]
fn disabling_changes_the_next_read_without_removal() {
    let health = ModifiableValue::new(100.0f32);
    let boost = Modifier::times(1.10);
    health.modifiers().add(Rc::clone(&boost));
    assert_eq!(health.value(), 110.0);

    let (changes, _guard) = count_changes(&*health);
    boost.set_enabled(false);
    assert_eq!(health.value(), 100.0);
    assert!(health.modifiers().contains(&boost));
    assert_eq!(changes.get(), 1);
}

#[test]
fn probe_matches_a_manual_fold() {
    let health = ModifiableValue::new(100.0f32);
    let flat = Modifier::plus(20.0);
    let boost = Modifier::times(1.10);
    health.modifiers().add(Rc::clone(&flat));
    health.modifiers().add(Rc::clone(&boost));

    assert_eq!(health.probe_affects(&flat), vec![(100.0, 120.0)]);
    assert_eq!(health.probe_affects(&boost), vec![(120.0, 132.0)]);

    boost.set_enabled(false);
    assert_eq!(health.probe_affects(&boost), vec![(120.0, 120.0)]);
}

#[test]
fn percentage_gain_attribute_feeds_a_multiplier() {
    // strength * (1 + 10%) modeled as two chained attributes.
    let strength = ModifiableValue::new(10.0f32);
    let gain = ModifiableValue::new(1.0f32);
    gain.modifiers().add(Modifier::plus(0.10));
    strength
        .modifiers()
        .add(Modifier::times_of(Rc::clone(&gain) as Rc<dyn ReadValue<f32>>));
    assert_eq!(strength.value(), 11.0);

    // Deepening the gain chain re-notifies strength transitively.
    let (changes, _guard) = count_changes(&*strength);
    gain.modifiers().add(Modifier::plus(0.40));
    assert_eq!(strength.value(), 15.0);
    assert_eq!(changes.get(), 1);
}

#[test]
fn bounded_health_follows_its_shrinking_cap() {
    let max_health = Value::new(100);
    let health = BoundedValue::with_bounds(
        50,
        attributes::Constant::new(0) as Rc<dyn ReadValue<i32>>,
        Rc::clone(&max_health) as Rc<dyn ReadValue<i32>>,
    );

    health.set(150);
    assert_eq!(health.get(), 100);

    let (changes, _guard) = count_changes(&*health);
    max_health.set(80);
    assert_eq!(health.get(), 80);
    assert_eq!(changes.get(), 1);
}

#[test]
fn modifiable_maximum_can_bound_a_resource() {
    // A classic sheet: max HP is an attribute with gear modifiers, current
    // HP is a bounded resource capped by it.
    let max_health = ModifiableValue::new(100);
    max_health.modifiers().add(Modifier::plus(20).named("ring of vigor"));

    let health = BoundedValue::with_bounds(
        100,
        attributes::Constant::new(0) as Rc<dyn ReadValue<i32>>,
        Rc::clone(&max_health) as Rc<dyn ReadValue<i32>>,
    );
    health.set(999);
    assert_eq!(health.get(), 120);

    // Losing the ring drags current HP down with the cap.
    max_health.modifiers().clear();
    assert_eq!(health.get(), 100);
}

#[test]
fn verbose_rendering_spells_out_the_chain() {
    let health = ModifiableValue::new(100.0f32);
    health.modifiers().add(Modifier::times(1.10).named("10% boost"));
    health.modifiers().add(Modifier::plus(5.0));

    assert_eq!(
        health.render(true),
        "\"base\" 100 \"10% boost\" *1.1 +5 -> 115"
    );
    assert_eq!(health.render(false), "115");
}
