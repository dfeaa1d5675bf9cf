//! App Router

use salvo::Router;

use crate::{auth, carts, chat, foods, orders};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("foods")
                .get(foods::index::handler)
                .push(Router::with_path("{food}").get(foods::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .push(Router::with_path("addToCart").post(carts::add_item::handler))
                        .push(Router::with_path("removeFromCart").post(carts::remove_item::handler))
                        .push(Router::with_path("checkout").post(carts::checkout::handler)),
                )
                .push(
                    Router::with_path("orders")
                        .push(Router::with_path("getOrders").get(orders::index::handler))
                        .push(
                            Router::with_path("trackOrder/{order}").get(orders::track::handler),
                        )
                        .push(
                            Router::with_path("subOrder/{order}/{sub_order}/status")
                                .patch(orders::advance::handler),
                        )
                        .push(
                            Router::with_path("cancelSubOrder/{order}/{sub_order}")
                                .patch(orders::cancel::handler),
                        )
                        .push(
                            Router::with_path("deliveredOrder/{order}")
                                .patch(orders::delivered::handler),
                        ),
                )
                .push(Router::with_path("chat").post(chat::create::handler)),
        )
}
