//! `#[derive(ActionKind)]` implementation.

use heck::ToShoutySnakeCase;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::collections::HashMap;
use strata_core::handler_key;
use syn::{Data, DeriveInput, Fields, LitStr, Variant, parse_macro_input, spanned::Spanned};

/// Arguments of a variant's `#[action(...)]` attribute.
struct VariantArgs {
    rename: Option<String>,
}

impl VariantArgs {
    fn from_variant(variant: &Variant) -> syn::Result<Self> {
        let mut rename = None;
        for attr in &variant.attrs {
            if !attr.path().is_ident("action") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unknown attribute, expected `rename`"))
                }
            })?;
        }
        Ok(Self { rename })
    }
}

pub fn derive_action_kind_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ActionKind can only be derived for enums",
        ));
    };

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ActionKind requires at least one variant",
        ));
    }

    let mut type_arms = Vec::new();
    let mut into_arms = Vec::new();
    let mut from_arms = Vec::new();
    let mut seen: HashMap<String, String> = HashMap::new();

    for variant in &data.variants {
        let args = VariantArgs::from_variant(variant)?;
        let ident = &variant.ident;
        let action_type = args
            .rename
            .unwrap_or_else(|| ident.to_string().to_shouty_snake_case());
        let key = handler_key(&action_type);

        if let Some(previous) = seen.insert(key.clone(), ident.to_string()) {
            return Err(syn::Error::new(
                variant.span(),
                format!("action type `{action_type}` collides with variant `{previous}`"),
            ));
        }

        match &variant.fields {
            Fields::Unit => {
                type_arms.push(quote! { Self::#ident => #action_type });
                into_arms.push(quote! {
                    Self::#ident => ::core::result::Result::Ok(::strata::Action::new(#action_type))
                });
                from_arms.push(quote! {
                    #key => ::core::option::Option::Some(Self::#ident)
                });
            }
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                type_arms.push(quote! { Self::#ident(..) => #action_type });
                into_arms.push(quote! {
                    Self::#ident(payload) => ::core::result::Result::Ok(
                        ::strata::Action::new(#action_type)
                            .with_payload(::strata::__private::serde_json::to_value(payload)?)
                    )
                });
                from_arms.push(quote! {
                    #key => ::strata::__private::serde_json::from_value(action.payload.clone())
                        .ok()
                        .map(Self::#ident)
                });
            }
            Fields::Unnamed(fields) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "tuple variants must have exactly one field; use a struct variant instead",
                ));
            }
            Fields::Named(fields) => {
                let names: Vec<_> = fields
                    .named
                    .iter()
                    .filter_map(|field| field.ident.as_ref())
                    .collect();
                let keys: Vec<String> = names.iter().map(|name| name.to_string()).collect();

                type_arms.push(quote! { Self::#ident { .. } => #action_type });
                into_arms.push(quote! {
                    Self::#ident { #(#names),* } => {
                        let mut payload = ::strata::__private::serde_json::Map::new();
                        #(
                            payload.insert(
                                ::std::string::String::from(#keys),
                                ::strata::__private::serde_json::to_value(#names)?,
                            );
                        )*
                        ::core::result::Result::Ok(
                            ::strata::Action::new(#action_type)
                                .with_payload(::strata::__private::serde_json::Value::Object(payload))
                        )
                    }
                });
                from_arms.push(quote! {
                    #key => (|| {
                        ::core::option::Option::Some(Self::#ident {
                            #(
                                #names: ::strata::__private::serde_json::from_value(
                                    action
                                        .payload
                                        .get(#keys)
                                        .cloned()
                                        .unwrap_or(::strata::__private::serde_json::Value::Null),
                                )
                                .ok()?,
                            )*
                        })
                    })()
                });
            }
        }
    }

    Ok(quote! {
        impl #impl_generics ::strata::ActionKind for #name #ty_generics #where_clause {
            fn action_type(&self) -> &'static str {
                match self {
                    #(#type_arms,)*
                }
            }

            fn into_action(
                self,
            ) -> ::core::result::Result<::strata::Action, ::strata::__private::serde_json::Error> {
                match self {
                    #(#into_arms,)*
                }
            }

            fn from_action(action: &::strata::Action) -> ::core::option::Option<Self> {
                match action.handler_key().as_str() {
                    #(#from_arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}
