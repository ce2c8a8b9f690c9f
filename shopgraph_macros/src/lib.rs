use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, ItemFn};

/// Runs an `async fn(Client)` test body twice: once against a client wrapping an in-process
/// engine, and once against a client talking HTTP to a live server on an ephemeral port.
#[proc_macro_attribute]
pub fn shop_test(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input: ItemFn = parse_macro_input!(item);

    let name = &input.sig.ident;
    let name_local = format_ident!("{}{}", name, "_local");
    let name_http = format_ident!("{}{}", name, "_http");

    let gen = quote! {
        #[tokio::test]
        async fn #name_local() {
            setup::init();

            let client = setup::local_test_client();
            #name(client).await;
        }

        #[tokio::test]
        async fn #name_http() {
            setup::init();

            let server = setup::TestServer::start();
            let client = server.client();
            #name(client).await;
            server.stop().await;
        }

        #input
    };

    gen.into()
}
