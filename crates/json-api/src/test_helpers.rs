//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use emporium_app::{
    access::Role,
    auth::MockAuthService,
    context::AppContext,
    domain::{
        accounts::{
            MockAccountsService,
            records::{AccountRecord, AccountUuid, PasswordHash},
        },
        carts::{MockCartsService, records::CartUuid},
        checkout::MockCheckoutService,
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        receipts::{
            MockReceiptsService,
            records::{ReceiptRecord, ReceiptUuid},
        },
    },
};

use crate::{envelope, extensions::*, state::State};

/// Service mocks. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub auth: MockAuthService,
    pub accounts: MockAccountsService,
    pub products: MockProductsService,
    pub carts: MockCartsService,
    pub receipts: MockReceiptsService,
    pub checkout: MockCheckoutService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::new(
            AppContext {
                auth: Arc::new(self.auth),
                accounts: Arc::new(self.accounts),
                products: Arc::new(self.products),
                carts: Arc::new(self.carts),
                receipts: Arc::new(self.receipts),
                checkout: Arc::new(self.checkout),
            },
            false,
        )
    }
}

/// Hoop that signs the request in as a fixed account.
struct SignedIn(AccountRecord);

#[handler]
impl SignedIn {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_current_account(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

/// A service for `route` backed by `mocks`, optionally signed in as `account`.
pub(crate) fn make_service(mocks: Mocks, account: Option<AccountRecord>, route: Router) -> Service {
    let mut router = Router::new().hoop(inject(mocks.into_state()));

    if let Some(account) = account {
        router = router.hoop(SignedIn(account));
    }

    envelope::service(router.push(route))
}

pub(crate) fn account_with_role(role: Role) -> AccountRecord {
    AccountRecord {
        uuid: AccountUuid::new(),
        first_name: "Ana".to_string(),
        last_name: "Lopez".to_string(),
        email: format!("{role}@example.com"),
        age: 30,
        password_hash: PasswordHash::new("hash"),
        role,
        cart_uuid: CartUuid::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        title: "Mug".to_string(),
        description: "Stoneware mug".to_string(),
        price: 1200,
        stock: 5,
        category: "kitchen".to_string(),
        code: "MUG-1".to_string(),
        available: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_receipt(amount: u64, purchaser: &str) -> ReceiptRecord {
    ReceiptRecord {
        uuid: ReceiptUuid::new(),
        code: "0190a8c47b6e7c2a9e1f2b3c4d5e6f70".to_string(),
        amount,
        purchaser: purchaser.to_string(),
        purchased_at: Timestamp::UNIX_EPOCH,
    }
}
