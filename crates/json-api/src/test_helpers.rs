//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use tiffin_app::{
    auth::MockAuthService,
    chat::MockChatService,
    context::AppContext,
    domain::{
        accounts::{MockAccountsService, models::UserUuid},
        carts::{
            MockCartsService,
            models::{ResolvedCart, ResolvedLineItem},
        },
        catalog::{
            MockCatalogService,
            models::{Food, FoodUuid, RestaurantUuid},
        },
        orders::{
            MockOrdersService,
            models::{Order, OrderUuid, PaymentMethod, PurchasedItem, SubOrder, SubOrderUuid},
            status::{OverallStatus, SubOrderStatus},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// Stand-in for the auth middleware in handler tests.
#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_accounts_mock() -> MockAccountsService {
    let mut accounts = MockAccountsService::new();

    accounts.expect_get_user().never();
    accounts.expect_create_user().never();

    accounts
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_get_food().never();
    catalog.expect_list_foods().never();
    catalog.expect_create_food().never();
    catalog.expect_get_restaurant().never();
    catalog.expect_list_restaurants().never();
    catalog.expect_create_restaurant().never();

    catalog
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_remove_item().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_checkout().never();
    orders.expect_list_orders().never();
    orders.expect_track_order().never();
    orders.expect_advance_sub_order().never();
    orders.expect_cancel_sub_order().never();
    orders.expect_mark_delivered().never();

    orders
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_chat_mock() -> MockChatService {
    let mut chat = MockChatService::new();

    chat.expect_reply().never();

    chat
}

/// An app context whose every service rejects being called.
fn base_context() -> AppContext {
    AppContext {
        accounts: Arc::new(strict_accounts_mock()),
        catalog: Arc::new(strict_catalog_mock()),
        carts: Arc::new(strict_carts_mock()),
        orders: Arc::new(strict_orders_mock()),
        auth: Arc::new(strict_auth_mock()),
        chat: Arc::new(strict_chat_mock()),
    }
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    let mut app = base_context();
    app.carts = Arc::new(carts);

    State::from_app_context(app)
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    let mut app = base_context();
    app.orders = Arc::new(orders);

    State::from_app_context(app)
}

pub(crate) fn state_with_catalog(catalog: MockCatalogService) -> Arc<State> {
    let mut app = base_context();
    app.catalog = Arc::new(catalog);

    State::from_app_context(app)
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    let mut app = base_context();
    app.auth = Arc::new(auth);

    State::from_app_context(app)
}

pub(crate) fn state_with_chat(chat: MockChatService) -> Arc<State> {
    let mut app = base_context();
    app.chat = Arc::new(chat);

    State::from_app_context(app)
}

/// A service whose routes sit behind a faked authenticated user.
pub(crate) fn authed_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

/// A service without any auth hoop, for public routes.
pub(crate) fn public_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn make_food(name: &str, price: u64) -> Food {
    Food {
        uuid: FoodUuid::new(),
        name: name.to_string(),
        price,
        category: "mains".to_string(),
        restaurant_uuid: RestaurantUuid::from_uuid(Uuid::nil()),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_resolved_cart(customer: UserUuid) -> ResolvedCart {
    let food = make_food("Dosa", 6_00);

    ResolvedCart {
        customer_uuid: customer,
        items: vec![ResolvedLineItem {
            food,
            quantity: 2,
            request: None,
        }],
        subtotal: 12_00,
    }
}

pub(crate) fn make_order(customer: UserUuid) -> Order {
    Order {
        uuid: OrderUuid::new(),
        customer_uuid: customer,
        delivery_address: "1 High Street".to_string(),
        payment_method: PaymentMethod::Cash,
        total_price: 20_00,
        overall_status: OverallStatus::Pending,
        sub_orders: vec![SubOrder {
            uuid: SubOrderUuid::new(),
            restaurant_uuid: RestaurantUuid::from_uuid(Uuid::nil()),
            restaurant_name: "Casa Uno".to_string(),
            status: SubOrderStatus::Pending,
            subtotal: 20_00,
            items: vec![PurchasedItem {
                food_uuid: FoodUuid::from_uuid(Uuid::nil()),
                name: "Dosa".to_string(),
                unit_price: 10_00,
                quantity: 2,
                request: None,
            }],
        }],
        version: 1,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
