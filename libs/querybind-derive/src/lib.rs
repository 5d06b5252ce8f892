use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, Data, DeriveInput, Expr, Fields, GenericArgument, LitStr, PathArguments,
    Type, TypeParamBound, TypePath, Visibility,
};

/// Derive macro for query-bindable records.
///
/// Implements `querybind::Record` for the annotated type:
///
/// - `descriptor()`: the field descriptor table, one `FieldSpec` per field in
///   declaration order.
/// - `field(index)` / `set_field(index, value)`: positional accessors for
///   every exported field.
///
/// `pub` fields are exported and bound from the query; every other field is
/// internal and keeps the value captured when the signature was scanned.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Default, Record)]
/// pub struct Example {
///     pub message: String,
///     #[param(rename = "w")]
///     pub weight: Option<i32>,
///     pub vec: [f64; 3],
///     #[param(rename = "name")]
///     pub names: Vec<String>,
///     #[param(skip)]
///     pub cached: u64,
///     unexported_data: bool,
/// }
/// ```
///
/// Field shapes are read from the declared type: `[T; N]` is fixed, `Vec<T>`
/// is repeated, `Option<T>` is optional, anything else is a scalar. `T` must
/// be `bool`, a primitive integer or float, or `String`; any other element
/// type is recorded as unsupported and makes `Signature::scan` fail when the
/// field is exported. Tuple structs, unit structs and enums get a descriptor
/// that reports their layout, so scanning them fails at runtime.
#[proc_macro_derive(Record, attributes(param))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(_) => return Ok(opaque_impl(input, quote! { Tuple })),
            Fields::Unit => return Ok(opaque_impl(input, quote! { Unit })),
        },
        Data::Enum(_) => return Ok(opaque_impl(input, quote! { Enum })),
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record cannot be derived for unions",
            ));
        }
    };

    let mut spec_tokens = Vec::new();
    let mut read_arms = Vec::new();
    let mut write_arms = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let field_ident = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;
        let field_name_str = field_ident.unraw().to_string();
        let attrs = FieldAttrs::parse(field)?;

        let exported = matches!(field.vis, Visibility::Public(_)) && !attrs.skip;
        let shape = classify_field(&field.ty);
        let shape_expr = shape.to_tokens();

        let constructor = if exported {
            quote! { exported }
        } else {
            quote! { internal }
        };
        let rename = attrs.rename.map(|name| quote! { .renamed(#name) });
        spec_tokens.push(quote! {
            ::querybind::FieldSpec::#constructor(#field_name_str, #index, #shape_expr)#rename
        });

        if !exported || !shape.is_supported() {
            continue;
        }

        let (read, write) = match shape {
            Shape::Scalar(_) => (quote! { from_scalar }, quote! { into_scalar }),
            Shape::Optional(_) => (quote! { from_optional }, quote! { into_optional }),
            Shape::Repeated(_) => (quote! { from_sequence }, quote! { into_vec }),
            Shape::Fixed(_, _) => (quote! { from_sequence }, quote! { into_array }),
        };
        read_arms.push(quote! {
            #index => ::core::option::Option::Some(
                ::querybind::FieldValue::#read(&self.#field_ident)
            )
        });
        write_arms.push(quote! {
            #index => {
                self.#field_ident = value.#write()?;
                ::core::result::Result::Ok(())
            }
        });
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::querybind::Record for #name #ty_generics #where_clause {
            fn descriptor() -> ::querybind::RecordDescriptor {
                ::querybind::RecordDescriptor::named(
                    ::core::any::type_name::<Self>(),
                    ::std::vec![#(#spec_tokens),*],
                )
            }

            fn field(&self, index: usize) -> ::core::option::Option<::querybind::FieldValue> {
                match index {
                    #(#read_arms,)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set_field(
                &mut self,
                index: usize,
                value: ::querybind::FieldValue,
            ) -> ::core::result::Result<(), ::querybind::FieldValue> {
                match index {
                    #(#write_arms)*
                    _ => ::core::result::Result::Err(value),
                }
            }
        }
    })
}

/// `Record` impl for types that are not structs with named fields.
fn opaque_impl(input: &DeriveInput, layout: TokenStream2) -> TokenStream2 {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    quote! {
        impl #impl_generics ::querybind::Record for #name #ty_generics #where_clause {
            fn descriptor() -> ::querybind::RecordDescriptor {
                ::querybind::RecordDescriptor::new(
                    ::core::any::type_name::<Self>(),
                    ::querybind::RecordLayout::#layout,
                )
            }

            fn field(&self, _index: usize) -> ::core::option::Option<::querybind::FieldValue> {
                ::core::option::Option::None
            }

            fn set_field(
                &mut self,
                _index: usize,
                value: ::querybind::FieldValue,
            ) -> ::core::result::Result<(), ::querybind::FieldValue> {
                ::core::result::Result::Err(value)
            }
        }
    }
}

/// Parsed `#[param(...)]` attributes of one field.
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
}

impl FieldAttrs {
    fn parse(field: &syn::Field) -> Result<Self, syn::Error> {
        let mut attrs = FieldAttrs::default();
        for attr in &field.attrs {
            if !attr.path().is_ident("param") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    if value.value().is_empty() {
                        return Err(syn::Error::new_spanned(
                            value,
                            "parameter name must not be empty",
                        ));
                    }
                    attrs.rename = Some(value.value());
                } else if meta.path.is_ident("skip") {
                    attrs.skip = true;
                } else {
                    return Err(meta.error("unknown param attribute (expected `rename` or `skip`)"));
                }
                Ok(())
            })?;
        }
        Ok(attrs)
    }
}

/// Element type of a field, as seen in the source.
enum Element {
    Primitive(Type),
    /// Tokens of a `querybind::UnsupportedKind` value.
    Unsupported(TokenStream2),
}

enum Shape {
    Scalar(Element),
    Optional(Element),
    Repeated(Element),
    Fixed(Element, Expr),
}

impl Shape {
    fn element(&self) -> &Element {
        match self {
            Shape::Scalar(e) | Shape::Optional(e) | Shape::Repeated(e) | Shape::Fixed(e, _) => e,
        }
    }

    fn is_supported(&self) -> bool {
        matches!(self.element(), Element::Primitive(_))
    }

    fn to_tokens(&self) -> TokenStream2 {
        let element = match self.element() {
            Element::Primitive(ty) => quote! {
                ::querybind::TypeShape::Primitive(<#ty as ::querybind::Primitive>::KIND)
            },
            Element::Unsupported(kind) => quote! {
                ::querybind::TypeShape::Unsupported(#kind)
            },
        };
        match self {
            Shape::Scalar(_) => quote! { ::querybind::FieldShape::Scalar(#element) },
            Shape::Optional(_) => quote! { ::querybind::FieldShape::Optional(#element) },
            Shape::Repeated(_) => quote! { ::querybind::FieldShape::Repeated(#element) },
            Shape::Fixed(_, len) => quote! { ::querybind::FieldShape::Fixed(#element, #len) },
        }
    }
}

const PRIMITIVES: &[&str] = &[
    "bool", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize", "f32", "f64",
    "String",
];

fn classify_field(ty: &Type) -> Shape {
    match ty {
        Type::Paren(inner) => classify_field(&inner.elem),
        Type::Group(inner) => classify_field(&inner.elem),
        Type::Array(array) => Shape::Fixed(classify_element(&array.elem), array.len.clone()),
        Type::Path(path) => {
            if let Some(inner) = wrapped(path, "Option") {
                Shape::Optional(classify_element(inner))
            } else if let Some(inner) = wrapped(path, "Vec") {
                Shape::Repeated(classify_element(inner))
            } else {
                Shape::Scalar(classify_element(ty))
            }
        }
        _ => Shape::Scalar(classify_element(ty)),
    }
}

fn classify_element(ty: &Type) -> Element {
    let unsupported = |kind: TokenStream2| {
        Element::Unsupported(quote! { ::querybind::UnsupportedKind::#kind })
    };
    match ty {
        Type::Paren(inner) => classify_element(&inner.elem),
        Type::Group(inner) => classify_element(&inner.elem),
        Type::Array(_) | Type::Slice(_) => unsupported(quote! { NestedShape }),
        Type::Ptr(_) => unsupported(quote! { RawPointer }),
        Type::Reference(_) => unsupported(quote! { Reference }),
        Type::BareFn(_) => unsupported(quote! { Function }),
        Type::TraitObject(object) => unsupported(trait_kind(object.bounds.iter())),
        Type::ImplTrait(object) => unsupported(trait_kind(object.bounds.iter())),
        Type::Path(path) if path.qself.is_none() => {
            let Some(last) = path.path.segments.last() else {
                return unsupported(record_kind(ty));
            };
            let ident = last.ident.to_string();
            match ident.as_str() {
                _ if PRIMITIVES.contains(&ident.as_str())
                    && matches!(last.arguments, PathArguments::None) =>
                {
                    Element::Primitive(ty.clone())
                }
                "Option" | "Vec" => unsupported(quote! { NestedShape }),
                "HashMap" | "BTreeMap" | "IndexMap" => unsupported(quote! { Map }),
                "Complex" | "Complex32" | "Complex64" => unsupported(quote! { Complex }),
                "Sender" | "Receiver" | "SyncSender" | "UnboundedSender" | "UnboundedReceiver" => {
                    unsupported(quote! { Channel })
                }
                "Box" | "Rc" | "Arc" => match wrapped(path, &ident) {
                    Some(Type::TraitObject(object)) => {
                        unsupported(trait_kind(object.bounds.iter()))
                    }
                    _ => unsupported(record_kind(ty)),
                },
                _ => unsupported(record_kind(ty)),
            }
        }
        _ => unsupported(record_kind(ty)),
    }
}

/// `Fn*` bounds are functions; any other trait object is an interface.
fn trait_kind<'a>(mut bounds: impl Iterator<Item = &'a TypeParamBound>) -> TokenStream2 {
    let callable = bounds.any(|bound| match bound {
        TypeParamBound::Trait(t) => t
            .path
            .segments
            .last()
            .is_some_and(|seg| matches!(seg.ident.to_string().as_str(), "Fn" | "FnMut" | "FnOnce")),
        _ => false,
    });
    if callable {
        quote! { Function }
    } else {
        quote! { Interface }
    }
}

fn record_kind(ty: &Type) -> TokenStream2 {
    let written = quote!(#ty).to_string().replace(' ', "");
    quote! { Record(#written) }
}

/// The `T` of `Wrapper<T>` when `path` names `wrapper` with one type argument.
fn wrapped<'a>(path: &'a TypePath, wrapper: &str) -> Option<&'a Type> {
    if path.qself.is_some() {
        return None;
    }
    let last = path.path.segments.last()?;
    if last.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });
    match (types.next(), types.next()) {
        (Some(ty), None) => Some(ty),
        _ => None,
    }
}
