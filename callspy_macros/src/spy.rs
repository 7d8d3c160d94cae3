use quote::{format_ident, quote};
use syn::spanned::Spanned;

use crate::attr::Attr;

pub fn generate(attr: Attr, item_trait: syn::ItemTrait) -> syn::Result<proc_macro2::TokenStream> {
    if !item_trait.generics.params.is_empty() {
        return Err(syn::Error::new(
            item_trait.generics.span(),
            "Generic traits are not supported",
        ));
    }

    let prefix = &attr.prefix;
    let trait_ident = &item_trait.ident;
    let vis = &item_trait.vis;
    let unsafety = &item_trait.unsafety;
    let spy_ident = attr
        .name
        .clone()
        .unwrap_or_else(|| format_ident!("{}Spy", trait_ident));

    let mut method_impls = vec![];
    for item in &item_trait.items {
        match item {
            syn::TraitItem::Fn(method) => method_impls.push(def_method_impl(method, prefix)?),
            syn::TraitItem::Type(item_type) => {
                return Err(syn::Error::new(
                    item_type.span(),
                    "Associated types are not supported",
                ))
            }
            syn::TraitItem::Const(item_const) if item_const.default.is_none() => {
                return Err(syn::Error::new(
                    item_const.span(),
                    "Associated consts without a default are not supported",
                ))
            }
            _ => {}
        }
    }

    let doc_string = format!(
        "Spy implementation of [{trait_ident}]. Dereferences to the spy that records its calls."
    );
    let doc_lit_str = syn::LitStr::new(&doc_string, proc_macro2::Span::call_site());

    Ok(quote! {
        #item_trait

        #[doc = #doc_lit_str]
        #[derive(Default, Debug)]
        #vis struct #spy_ident {
            spy: #prefix::macro_api::Spy,
        }

        impl #spy_ident {
            /// Create a spy without any expectations.
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl ::core::ops::Deref for #spy_ident {
            type Target = #prefix::macro_api::Spy;

            fn deref(&self) -> &Self::Target {
                &self.spy
            }
        }

        #unsafety impl #trait_ident for #spy_ident {
            #(#method_impls)*
        }
    })
}

fn def_method_impl(
    method: &syn::TraitItemFn,
    prefix: &syn::Path,
) -> syn::Result<proc_macro2::TokenStream> {
    let sig = &method.sig;

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "async methods are not supported",
        ));
    }

    if sig
        .generics
        .params
        .iter()
        .any(|param| !matches!(param, syn::GenericParam::Lifetime(_)))
    {
        return Err(syn::Error::new(
            sig.generics.span(),
            "Generic methods are not supported",
        ));
    }

    match sig.receiver() {
        None => {
            return Err(syn::Error::new(
                sig.span(),
                "Methods without a self receiver cannot be spied",
            ))
        }
        Some(receiver) if receiver.colon_token.is_some() => {
            return Err(syn::Error::new(
                receiver.span(),
                "Typed self receivers are not supported",
            ))
        }
        Some(_) => {}
    }

    let name = syn::LitStr::new(&sig.ident.to_string(), sig.ident.span());

    let args = sig
        .inputs
        .iter()
        .filter_map(|fn_arg| match fn_arg {
            syn::FnArg::Receiver(_) => None,
            syn::FnArg::Typed(pat_type) => Some(def_arg(pat_type, prefix)),
        })
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        #sig {
            #[allow(unused_imports)]
            use #prefix::macro_api::{ViaClone as _, ViaTypeName as _, ViaValue as _};
            let call = #prefix::macro_api::Spy::called(&self.spy, #name, &mut [#(#args),*]);
            #prefix::macro_api::unpack(call)
        }
    })
}

/// `&mut T` parameters are output slots, everything else is observed through a shared reference.
/// Which representation a parameter gets is decided by `into_arg` resolution on its type.
fn def_arg(pat_type: &syn::PatType, prefix: &syn::Path) -> syn::Result<proc_macro2::TokenStream> {
    let ident = match pat_type.pat.as_ref() {
        syn::Pat::Ident(pat_ident) => &pat_ident.ident,
        _ => return Err(syn::Error::new(pat_type.span(), "Unprocessable argument")),
    };

    Ok(match pat_type.ty.as_ref() {
        syn::Type::Reference(reference) if reference.mutability.is_some() => {
            quote! { #prefix::macro_api::ArgMut(#ident).into_arg() }
        }
        syn::Type::Reference(_) => {
            quote! { #prefix::macro_api::ArgRef(#ident).into_arg() }
        }
        _ => quote! { #prefix::macro_api::ArgRef(&#ident).into_arg() },
    })
}
