//! Model derive macro implementation
//!
//! ## Module Structure
//!
//! - `attrs`: Struct and field attribute parsing

mod attrs;

use attrs::{get_field_attr, get_table_name};

use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashMap;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let table_name = get_table_name(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Model can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Model can only be derived for structs",
            ));
        }
    };

    let mut metas = Vec::with_capacity(fields.len());
    let mut idents = Vec::with_capacity(fields.len());
    let mut seen_tags: HashMap<String, syn::Ident> = HashMap::with_capacity(fields.len());

    for field in fields.iter() {
        let field_ident = field.ident.clone().unwrap();
        // `r#type` is described as `type`.
        let field_name = field_ident.unraw().to_string();
        let attr = get_field_attr(field)?;
        let tag = attr.column.flatten();

        if let Some(tag) = &tag {
            if let Some(prev) = seen_tags.insert(tag.clone(), field_ident.clone()) {
                return Err(syn::Error::new_spanned(
                    field,
                    format!("column '{tag}' is already used by field `{prev}`"),
                ));
            }
        }

        let mut meta = quote! { ::tagsql::FieldMeta::new(#field_name) };
        if let Some(tag) = &tag {
            meta = quote! { #meta.with_tag(#tag) };
        }
        if attr.is_id {
            meta = quote! { #meta.with_primary_key() };
        }

        metas.push(meta);
        idents.push(field_ident);
    }

    let table_impl = match &table_name {
        Some(table) => quote! {
            impl #impl_generics ::tagsql::Table for #name #ty_generics #where_clause {
                fn table_name(&self) -> &str {
                    #table
                }
            }
        },
        None => quote! {},
    };

    Ok(quote! {
        impl #impl_generics ::tagsql::Reflect for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #name_str
            }

            fn shape(&self) -> ::tagsql::Shape<'_> {
                ::tagsql::Shape::Struct(::std::vec![
                    #(::tagsql::FieldRef::new(#metas, &self.#idents)),*
                ])
            }
        }

        impl #impl_generics ::tagsql::ReflectMut for #name #ty_generics #where_clause {
            fn shape_mut(&mut self) -> ::tagsql::ShapeMut<'_> {
                ::tagsql::ShapeMut::Struct(::std::vec![
                    #(::tagsql::FieldMut::new(#metas, &mut self.#idents)),*
                ])
            }
        }

        #table_impl
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn rejects_enums_and_tuple_structs() {
        let input: DeriveInput = parse_quote! {
            enum E { A, B }
        };
        assert!(expand(input).is_err());

        let input: DeriveInput = parse_quote! {
            struct T(i64, String);
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn rejects_duplicate_tags() {
        let input: DeriveInput = parse_quote! {
            struct D {
                #[orm(column = "name")]
                a: String,
                #[orm(column = "name")]
                b: String,
            }
        };
        let err = expand(input).unwrap_err();
        assert!(err.to_string().contains("column 'name' is already used by field `a`"));
    }

    #[test]
    fn emits_table_impl_only_with_table() {
        let input: DeriveInput = parse_quote! {
            #[orm(table = "test")]
            struct A {
                #[orm(id, column = "id")]
                r#type: i64,
            }
        };
        let out = expand(input).unwrap().to_string();
        assert!(out.contains(":: tagsql :: Table for A"));
        assert!(out.contains("FieldMeta :: new (\"type\")"));
        assert!(out.contains("with_primary_key"));

        let input: DeriveInput = parse_quote! {
            struct B { x: i64 }
        };
        let out = expand(input).unwrap().to_string();
        assert!(!out.contains("Table"));
    }
}
