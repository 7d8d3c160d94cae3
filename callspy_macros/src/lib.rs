//! The callspy procedural macro.

#![forbid(unsafe_code)]

mod attr;
mod spy;

extern crate proc_macro;

///
/// Generate a spy-backed implementation of a trait.
/// Re-exported by `callspy`, it is documented there.
///
#[proc_macro_attribute]
pub fn spy(
    attr: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let attr = syn::parse_macro_input!(attr as attr::Attr);
    let item_trait = syn::parse_macro_input!(input as syn::ItemTrait);

    let output = match spy::generate(attr, item_trait) {
        Ok(stream) => stream,
        Err(err) => err.to_compile_error(),
    };

    proc_macro::TokenStream::from(output)
}
