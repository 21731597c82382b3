//! A small user directory, driven by simulated clicks instead of a browser.
//!
//! Run with `WAYFINDER_LOG=debug` to see what the router does.

use std::{cell::RefCell, rc::Rc};

use tracing::{info, Level};
use wayfinder_router::prelude::*;

struct User {
    id: u32,
    name: &'static str,
    email: &'static str,
    role: &'static str,
}

struct Product {
    id: u32,
    name: &'static str,
    price: &'static str,
    category: &'static str,
}

const USERS: &[User] = &[
    User {
        id: 123,
        name: "Ana García",
        email: "ana@example.com",
        role: "Admin",
    },
    User {
        id: 456,
        name: "Carlos López",
        email: "carlos@example.com",
        role: "User",
    },
    User {
        id: 789,
        name: "María Rodríguez",
        email: "maria@example.com",
        role: "Moderator",
    },
];

const PRODUCTS: &[Product] = &[
    Product {
        id: 1,
        name: "Laptop Pro",
        price: "$1299",
        category: "electronics",
    },
    Product {
        id: 2,
        name: "Smartphone X",
        price: "$899",
        category: "electronics",
    },
    Product {
        id: 3,
        name: "Tablet Air",
        price: "$599",
        category: "electronics",
    },
];

/// What the page would show, one line per element.
type Screen = Rc<RefCell<Vec<String>>>;

fn render_user(screen: &Screen, id: Option<&str>) {
    let user = id
        .and_then(|id| id.parse::<u32>().ok())
        .and_then(|id| USERS.iter().find(|user| user.id == id));

    let mut screen = screen.borrow_mut();
    screen.clear();
    match user {
        Some(user) => {
            screen.push(user.name.to_string());
            screen.push(format!("{} ({})", user.email, user.role));
        }
        None => screen.push(format!("no user with id {}", id.unwrap_or("?"))),
    }
}

fn render_product(screen: &Screen, category: Option<&str>, id: Option<&str>) {
    let product = id
        .and_then(|id| id.parse::<u32>().ok())
        .and_then(|id| PRODUCTS.iter().find(|p| p.id == id && Some(p.category) == category));

    let mut screen = screen.borrow_mut();
    screen.clear();
    match product {
        Some(product) => screen.push(format!("{}: {}", product.name, product.price)),
        None => screen.push(String::from("no such product")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    wayfinder_logger::init(Level::INFO)?;

    let screen = Screen::default();

    let list = screen.clone();
    let user = screen.clone();
    let product = screen.clone();
    let table = RouteTable::new()
        .route(Route::new("/", |_| {})?.with_title("Home").with_page("home"))
        .route(
            Route::new("/users", move |_| {
                *list.borrow_mut() = USERS
                    .iter()
                    .map(|user| format!("{} {}", user.id, user.name))
                    .collect();
            })?
            .with_title("Users")
            .with_page("users"),
        )
        .route(
            Route::new("/users/:id", move |params| render_user(&user, params.get("id")))?
                .with_title("User detail")
                .with_page("user-detail"),
        )
        .route(
            Route::new("/products/:category/:id", move |params| {
                render_product(&product, params.get("category"), params.get("id"))
            })?
            .with_title("Product")
            .with_page("product-detail"),
        )
        .route(Route::new("/about", |_| {})?.with_title("About").with_page("about"));

    let history = Rc::new(MemoryHistory::default());
    let mut router = Router::new(
        table,
        history,
        RouterConfig::default().on_update(|state| {
            info!(page = state.page.as_str(), "showing page");
        }),
    );

    let printed = screen.clone();
    let _subscription = router.subscribe(move |state| {
        if state.resolution == Resolution::Unresolved {
            return;
        }
        println!("[{}] {}", state.page, state.breadcrumb);
        if state.is_not_found() {
            return;
        }
        for line in printed.borrow().iter() {
            println!("    {line}");
        }
    });

    router.start()?;

    let users = router.href("users", &[])?;
    router.intercept_click(&LinkClick::routed(users))?;
    let carlos = router.href("user-detail", &[("id", "456")])?;
    router.intercept_click(&LinkClick::routed(carlos))?;
    // relative to /users/456
    router.intercept_click(&LinkClick::routed("789"))?;

    let laptop = router.href("product-detail", &[("category", "electronics"), ("id", "1")])?;
    router.intercept_click(&LinkClick::routed(laptop))?;

    router.navigate("/contact", None)?;
    router.go_back();

    // left for the browser: opens in a new tab
    let handled = router.intercept_click(&LinkClick::routed("/about").with_modifier(true))?;
    println!("new tab click handled by the router: {handled}");

    Ok(())
}
