// Copyright (C) 2018-2026 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

#![warn(
  future_incompatible,
  missing_debug_implementations,
  missing_docs,
  rust_2018_compatibility,
  rust_2018_idioms,
  trivial_casts,
  trivial_numeric_casts,
  unsafe_code,
  unstable_features,
  unused_import_braces,
  unused_qualifications,
  unused_results,
)]

//! A crate providing custom derive functionality for the `tessel`
//! crate.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as Tokens;
use quote::quote;
use syn::parse2;
use syn::Attribute;
use syn::Data;
use syn::DeriveInput;
use syn::Error;
use syn::Fields;
use syn::Result;


/// Whether or not to create a default implementation of `Type::new()`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum New {
  Default,
  None,
}


/// Custom derive functionality for the `tessel::Widget` trait.
///
/// Using this macro a default implementation of the `tessel::Widget`
/// trait can be created. Note that this trait is just a unification of
/// the `tessel::Object`, `tessel::Renderable`, `tessel::Layout`, and
/// `tessel::Handleable` traits. Only implementations of the former two
/// will be auto generated; `tessel::Layout` and `tessel::Handleable`
/// most likely need customization.
///
/// With the `#[tessel(default_new)]` attribute a constructor taking the
/// widget's `Id` is generated as well.
///
/// This macro roughly expands to the following code:
///
/// ```rust
/// # use std::any::TypeId;
/// # #[derive(Debug)]
/// # struct TestWidget {
/// #   id: tessel::Id,
/// # }
/// impl tessel::Renderable for TestWidget {
///   fn type_id(&self) -> TypeId {
///     TypeId::of::<TestWidget>()
///   }
///
///   fn draw(
///     &self,
///     renderer: &mut dyn tessel::Renderer,
///     cap: &dyn tessel::Cap,
///     rect: tessel::Rect,
///     group: &tessel::Group,
///   ) {
///     renderer.draw(tessel::Object::id(self), self, cap, rect, group)
///   }
/// }
///
/// impl tessel::Object for TestWidget {
///   fn id(&self) -> tessel::Id {
///     self.id
///   }
/// }
///
/// impl tessel::Widget for TestWidget {
///   fn type_id(&self) -> TypeId {
///     TypeId::of::<TestWidget>()
///   }
/// }
/// # impl tessel::Handleable for TestWidget {}
/// # impl tessel::Layout for TestWidget {}
/// ```
#[proc_macro_derive(Widget, attributes(tessel))]
pub fn widget(input: TokenStream) -> TokenStream {
  expand_widget(input.into())
    .unwrap_or_else(Error::into_compile_error)
    .into()
}

fn expand_widget(input: Tokens) -> Result<Tokens> {
  let input = parse2::<DeriveInput>(input)?;
  let new = parse_widget_attributes(&input.attrs)?;
  expand_widget_input(new, &input)
}

/// Parse the macro's attributes.
fn parse_widget_attributes(attributes: &[Attribute]) -> Result<New> {
  let mut new = New::None;

  for attribute in attributes {
    // We are not interested in anything that is not a
    // #[tessel(...)] attribute.
    if !attribute.path().is_ident("tessel") {
      continue
    }

    let () = attribute.parse_nested_meta(|meta| {
      if meta.path.is_ident("default_new") {
        new = New::Default;
        Ok(())
      } else {
        Err(meta.error("unsupported attribute"))
      }
    })?;
  }
  Ok(new)
}

/// Expand the input with the implementation of the required traits.
fn expand_widget_input(new: New, input: &DeriveInput) -> Result<Tokens> {
  match &input.data {
    Data::Struct(data) => {
      let () = check_struct_fields(input, &data.fields)?;
      Ok(expand_widget_traits(new, input))
    },
    _ => Err(Error::new_spanned(
      input,
      "#[derive(Widget)] is only defined for structs",
    )),
  }
}

/// Check the fields of the user's struct for required ones.
// Note that we only check for the names of the required fields, not for
// the types. Checking types is best-effort anyway as we are working on
// tokens without context.
fn check_struct_fields(input: &DeriveInput, fields: &Fields) -> Result<()> {
  let found = fields
    .iter()
    .any(|field| field.ident.as_ref().is_some_and(|ident| ident == "id"));

  if found {
    Ok(())
  } else {
    Err(Error::new_spanned(
      &input.ident,
      "struct field id: tessel::Id not found",
    ))
  }
}

/// Expand the struct input with the implementation of the required
/// traits.
fn expand_widget_traits(new: New, input: &DeriveInput) -> Tokens {
  let new_impl = expand_new_impl(new, input);
  let renderable = expand_renderable_trait(input);
  let object = expand_object_trait(input);
  let widget = expand_widget_trait(input);

  quote! {
    #new_impl
    #renderable
    #object
    #widget
  }
}

/// Expand an implementation of `Type::new()` for the struct.
fn expand_new_impl(new: New, input: &DeriveInput) -> Tokens {
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
  let doc = format!("Create a new `{name}` widget with the given `Id`.");

  match new {
    New::Default => {
      quote! {
        impl #impl_generics #name #ty_generics #where_clause {
          #[doc = #doc]
          pub fn new(id: tessel::Id) -> Self {
            Self { id }
          }
        }
      }
    },
    New::None => quote! {},
  }
}

/// Expand an implementation for the `tessel::Renderable` trait.
fn expand_renderable_trait(input: &DeriveInput) -> Tokens {
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

  quote! {
    impl #impl_generics tessel::Renderable for #name #ty_generics #where_clause {
      fn type_id(&self) -> ::std::any::TypeId {
        ::std::any::TypeId::of::<#name #ty_generics>()
      }

      fn draw(
        &self,
        renderer: &mut dyn tessel::Renderer,
        cap: &dyn tessel::Cap,
        rect: tessel::Rect,
        group: &tessel::Group,
      ) {
        renderer.draw(tessel::Object::id(self), self, cap, rect, group)
      }
    }
  }
}

/// Expand an implementation for the `tessel::Object` trait.
fn expand_object_trait(input: &DeriveInput) -> Tokens {
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

  quote! {
    impl #impl_generics tessel::Object for #name #ty_generics #where_clause {
      fn id(&self) -> tessel::Id {
        self.id
      }
    }
  }
}

/// Expand an implementation for the `tessel::Widget` trait.
fn expand_widget_trait(input: &DeriveInput) -> Tokens {
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

  quote! {
    impl #impl_generics tessel::Widget for #name #ty_generics #where_clause {
      fn type_id(&self) -> ::std::any::TypeId {
        ::std::any::TypeId::of::<#name #ty_generics>()
      }
    }
  }
}


/// Custom derive functionality for the `tessel::Handleable` trait.
///
/// Using this macro a default implementation of the
/// `tessel::Handleable` trait can be created. This functionality is
/// mostly used for widgets that do not react to input themselves, such
/// as containers, and in testing scenarios.
///
/// This macro roughly expands to the following code:
///
/// ```rust
/// # use tessel_derive::Widget;
/// # #[derive(Debug, Widget)]
/// # struct TestWidget {
/// #   id: tessel::Id,
/// # }
/// # impl tessel::Layout for TestWidget {}
/// impl tessel::Handleable for TestWidget {}
/// # fn main() {}
/// ```
#[proc_macro_derive(Handleable)]
pub fn handleable(input: TokenStream) -> TokenStream {
  expand_handleable(input.into())
    .unwrap_or_else(Error::into_compile_error)
    .into()
}

fn expand_handleable(input: Tokens) -> Result<Tokens> {
  let input = parse2::<DeriveInput>(input)?;

  match &input.data {
    Data::Struct(_) => {
      let name = &input.ident;
      let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

      Ok(quote! {
        impl #impl_generics tessel::Handleable for #name #ty_generics #where_clause {}
      })
    },
    _ => Err(Error::new_spanned(
      &input,
      "#[derive(Handleable)] is only defined for structs",
    )),
  }
}
