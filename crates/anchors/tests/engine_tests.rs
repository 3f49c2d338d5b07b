//! End-to-end engine tests: derived values, observation, minimal recomputation

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use anchors::*;

#[test]
fn test_integer_arithmetic_stays_up_to_date() {
    let mut engine = Engine::new();

    let anchor_a = engine.var(2);
    let anchor_b = engine.var(3);
    let anchor_c = engine.map2(&anchor_a, &anchor_b, |a, b| a + b);

    engine.observe(&anchor_c);
    assert_eq!(engine.get(&anchor_c), 5);

    engine.set(&anchor_a, 10);

    // Derived anchors can be added after inputs have already changed
    let anchor_d = engine.map(&anchor_c, |c| c * 3);
    engine.observe(&anchor_d);

    assert_eq!(engine.get(&anchor_c), 13);
    assert_eq!(engine.get(&anchor_d), 39);
}

#[test]
fn test_string_concatenation_stays_up_to_date() {
    let mut engine = Engine::new();

    let username = engine.var(String::from("John"));
    let greeting = engine.map(&username, |name| format!("Hello, {name}"));

    engine.observe(&greeting);
    assert_eq!("Hello, John", engine.get(&greeting));

    engine.set(&username, String::from("Samuel"));
    assert_eq!("Hello, Samuel", engine.get(&greeting));
}

#[test]
fn test_only_affected_anchors_are_recomputed() {
    let mut engine = Engine::new();

    let anchor_w = engine.var(10);
    let anchor_x = engine.var(4);

    let addition_counter = Rc::new(Cell::new(0));
    let additions = Rc::clone(&addition_counter);
    let anchor_y = engine.map2(&anchor_w, &anchor_x, move |a, b| {
        additions.set(additions.get() + 1);
        a + b
    });

    let anchor_z = engine.var(5);

    let subtraction_counter = Rc::new(Cell::new(0));
    let subtractions = Rc::clone(&subtraction_counter);
    let result = engine.map2(&anchor_y, &anchor_z, move |a, b| {
        subtractions.set(subtractions.get() + 1);
        a - b
    });

    engine.observe(&result);

    assert_eq!(engine.get(&result), 9);
    assert_eq!(addition_counter.get(), 1);
    assert_eq!(subtraction_counter.get(), 1);

    engine.set(&anchor_z, 7);

    assert_eq!(engine.get(&result), 7);
    // The sum's inputs did not change, so it must not run again
    assert_eq!(addition_counter.get(), 1);
    assert_eq!(subtraction_counter.get(), 2);
}

#[test]
fn test_vector_aggregates_stay_up_to_date() {
    let mut engine = Engine::new();

    let my_orders = engine.var(vec![150, 200, 300]);

    let max_order = engine.map(&my_orders, |v: &Vec<i32>| {
        v.iter().copied().max().unwrap()
    });
    let min_order = engine.map(&my_orders, |v: &Vec<i32>| {
        v.iter().copied().min().unwrap()
    });
    let order_range = engine.map2(&max_order, &min_order, |max, min| max - min);

    engine.observe_all(&[max_order, min_order, order_range]);

    assert_eq!(engine.get(&max_order), 300);
    assert_eq!(engine.get(&min_order), 150);
    assert_eq!(engine.get(&order_range), 150);

    engine.set(&my_orders, vec![300, 400, 800]);

    assert_eq!(engine.get(&max_order), 800);
    assert_eq!(engine.get(&min_order), 300);
    assert_eq!(engine.get(&order_range), 500);
}

#[test]
fn test_map3_arithmetic_with_mixed_input_types() {
    let mut engine = Engine::new();

    let anchor_a = engine.var(2);
    let anchor_b = engine.var(3);
    let anchor_c = engine.var(0.5);

    let anchor_d = engine.map3(&anchor_a, &anchor_b, &anchor_c, |a, b, c| {
        f64::from(*a) * f64::from(*b) * c
    });

    engine.observe(&anchor_d);
    assert_eq!(engine.get(&anchor_d), 3.0);

    engine.set(&anchor_a, 10);
    engine.set(&anchor_c, 1.0);

    let anchor_e = engine.map(&anchor_d, |d| d + 5.0);
    engine.observe(&anchor_e);

    assert_eq!(engine.get(&anchor_d), 30.0);
    assert_eq!(engine.get(&anchor_e), 35.0);
}

#[test]
fn test_map4_string_concatenation() {
    let mut engine = Engine::new();

    let anchor_one = engine.var(String::from("Liberte"));
    let anchor_two = engine.var(String::from("Egalite"));
    let anchor_three = engine.var(String::from("Fraternite"));
    let anchor_four = engine.var(String::from("Beyonce"));

    let result = engine.map4(
        &anchor_one,
        &anchor_two,
        &anchor_three,
        &anchor_four,
        |s1, s2, s3, s4| format!("{s1}, {s2}, {s3}, {s4}"),
    );

    engine.observe(&result);
    assert_eq!("Liberte, Egalite, Fraternite, Beyonce", engine.get(&result));

    engine.set(&anchor_two, String::from("Beyonce"));
    engine.set(&anchor_four, String::from("Fiance"));

    assert_eq!("Liberte, Beyonce, Fraternite, Fiance", engine.get(&result));
}

#[test]
fn test_quadratic_formula_recomputes_only_changed_branches() {
    let mut engine = Engine::new();

    let a = engine.var(2.0);
    let b = engine.var(-5.0);
    let c = engine.var(-3.0);

    let b_square_counter = Rc::new(Cell::new(0));
    let four_ac_counter = Rc::new(Cell::new(0));
    let denominator_counter = Rc::new(Cell::new(0));

    let negative_b = engine.map(&b, |b| -b);

    let b_squares = Rc::clone(&b_square_counter);
    let b_square = engine.map(&b, move |b| {
        b_squares.set(b_squares.get() + 1);
        b * b
    });

    let four_acs = Rc::clone(&four_ac_counter);
    let four_ac = engine.map2(&a, &c, move |x, y| {
        four_acs.set(four_acs.get() + 1);
        4.0 * x * y
    });

    let square_root = engine.map2(&b_square, &four_ac, |x: &f64, y: &f64| (x - y).sqrt());

    let denominators = Rc::clone(&denominator_counter);
    let denominator = engine.map(&a, move |a| {
        denominators.set(denominators.get() + 1);
        2.0 * a
    });

    let x1 = engine.map3(&negative_b, &square_root, &denominator, |x, y, z| {
        (x + y) / z
    });
    let x2 = engine.map3(&negative_b, &square_root, &denominator, |x, y, z| {
        (x - y) / z
    });

    engine.observe(&x1);
    engine.observe(&x2);

    assert_eq!(engine.get(&x1), 3.0);
    assert_eq!(engine.get(&x2), -0.5);

    assert_eq!(b_square_counter.get(), 1);
    assert_eq!(four_ac_counter.get(), 1);
    assert_eq!(denominator_counter.get(), 1);

    engine.set(&c, -7.0);

    assert_eq!(engine.get(&x1), 3.5);
    assert_eq!(engine.get(&x2), -1.0);

    // Only c changed, so only the branch through 4ac may run again
    assert_eq!(b_square_counter.get(), 1);
    assert_eq!(four_ac_counter.get(), 2);
    assert_eq!(denominator_counter.get(), 1);
}
