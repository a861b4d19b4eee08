use oso::{Oso, OsoError, PolarClass};

use crate::auth::{Marketplace, User};

pub fn new() -> Result<Oso, OsoError> {
    let mut o = Oso::new();

    o.register_class(Marketplace::get_polar_class())?;
    o.register_class(User::get_polar_class())?;

    o.load_str(include_str!("rules.polar"))?;

    Ok(o)
}

#[test]
fn customer_permissions_test() {
    use crate::entities::UserType;

    let authorizor = new().unwrap();
    let customer = User::new(UserType::Customer, Some("John Doe".into()));

    let result = authorizor.is_allowed(customer.clone(), "read_offers", Marketplace::collision_collect());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(customer.clone(), "update_notifications", Marketplace::collision_collect());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(customer.clone(), "place_bid", Marketplace::collision_collect());
    assert_eq!(result.unwrap(), false);

    let result = authorizor.is_allowed(customer.clone(), "release_bids", Marketplace::collision_collect());
    assert_eq!(result.unwrap(), false);
}

#[test]
fn shop_permissions_test() {
    use crate::entities::UserType;

    let authorizor = new().unwrap();
    let shop = User::new(UserType::Shop, Some("ABC Body Shop".into()));

    let result = authorizor.is_allowed(shop.clone(), "place_bid", Marketplace::collision_collect());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(shop.clone(), "subscribe", Marketplace::collision_collect());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(shop.clone(), "read_bids", Marketplace::collision_collect());
    assert_eq!(result.unwrap(), false);

    let result = authorizor.is_allowed(shop.clone(), "read_offers", Marketplace::collision_collect());
    assert_eq!(result.unwrap(), false);
}

#[test]
fn admin_permissions_test() {
    use crate::entities::UserType;

    let authorizor = new().unwrap();
    let admin = User::new(UserType::Admin, Some("Admin".into()));

    for action in ["read_bids", "release_bids", "close_deal", "read_dashboard"] {
        let result = authorizor.is_allowed(admin.clone(), action, Marketplace::collision_collect());
        assert_eq!(result.unwrap(), true, "{}", action);
    }

    let result = authorizor.is_allowed(admin.clone(), "place_bid", Marketplace::collision_collect());
    assert_eq!(result.unwrap(), false);

    let result = authorizor.is_allowed(admin.clone(), "no_such_action", Marketplace::collision_collect());
    assert_eq!(result.unwrap(), false);
}
