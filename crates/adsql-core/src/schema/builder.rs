use super::*;
use crate::{stmt::Type, Error, Result};
use std::collections::HashSet;

/// Collects entity, enum and filter definitions and resolves them into a
/// [`Schema`].
///
/// All names are resolved in [`Builder::build`]; definitions may reference
/// entities that are added later.
#[derive(Default)]
pub struct Builder {
    entities: Vec<EntityDef>,
    enums: Vec<EnumDef>,
    policies: Vec<PolicyDef>,
    filter_precedence: FilterPrecedence,
}

/// Definition of one entity and the table it is stored in.
#[derive(Debug, Clone)]
pub struct EntityDef {
    name: String,
    table: Option<String>,
    members: Vec<MemberDef>,
}

#[derive(Debug, Clone)]
pub struct MemberDef {
    name: String,
    kind: MemberDefKind,
    nullable: bool,
    primary_key: bool,
}

#[derive(Debug, Clone)]
enum MemberDefKind {
    Column {
        column: Option<String>,
        ty: Type,
        sql_ty: SqlType,
    },
    Enum {
        column: Option<String>,
        enum_name: String,
        sql_ty: SqlType,
    },
    Composite {
        date: String,
        time: String,
    },
    Association {
        target: String,
        source_keys: Vec<String>,
        target_keys: Vec<String>,
        many: bool,
        filter: Option<AttributeFilter>,
    },
}

#[derive(Debug, Clone)]
pub struct EnumDef {
    name: String,
    repr: EnumRepr,
    variants: Vec<EnumVariant>,
    default_variant: Option<String>,
}

type PolicyFn = Box<dyn FnOnce(&PolicyRow<'_>) -> Result<Expr>>;

struct PolicyDef {
    entity: String,
    member: String,
    predicate: PolicyFn,
}

/// The related row handed to an association policy predicate.
#[derive(Debug)]
pub struct PolicyRow<'a> {
    entity: &'a Entity,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn entity(mut self, entity: EntityDef) -> Builder {
        self.entities.push(entity);
        self
    }

    pub fn enum_def(mut self, enum_def: EnumDef) -> Builder {
        self.enums.push(enum_def);
        self
    }

    /// Registers a filter for the association `entity.member`. The predicate
    /// is built against the related entity and folded into the association's
    /// join condition.
    pub fn associate_with<F>(
        mut self,
        entity: impl Into<String>,
        member: impl Into<String>,
        predicate: F,
    ) -> Builder
    where
        F: FnOnce(&PolicyRow<'_>) -> Result<Expr> + 'static,
    {
        self.policies.push(PolicyDef {
            entity: entity.into(),
            member: member.into(),
            predicate: Box::new(predicate),
        });
        self
    }

    pub fn filter_precedence(mut self, filter_precedence: FilterPrecedence) -> Builder {
        self.filter_precedence = filter_precedence;
        self
    }

    pub fn build(self) -> Result<Schema> {
        let enums = build_enums(&self.enums)?;
        let mut entities = declare_entities(&self.entities)?;

        for (index, def) in self.entities.iter().enumerate() {
            let members = def
                .members
                .iter()
                .enumerate()
                .map(|(member_index, member)| {
                    let id = MemberId {
                        entity: EntityId(index),
                        index: member_index,
                    };
                    resolve_member(id, def, member, &self.entities, &enums)
                })
                .collect::<Result<Vec<_>>>()
                .map_err(|err| err.context(crate::err!("entity `{}`", def.name)))?;

            entities[index].members = members;
        }

        for entity in &entities {
            validate_entity(entity, &entities)?;
        }

        let mut policy_filters = IndexMap::new();

        for policy in self.policies {
            let Some(entity) = entities.iter().find(|e| e.name == policy.entity) else {
                return Err(Error::invalid_schema(format!(
                    "policy filter declared on unknown entity `{}`",
                    policy.entity
                )));
            };

            let Some(member) = entity.member_by_name(&policy.member) else {
                return Err(Error::unresolved_member(&entity.name, &policy.member));
            };

            let MemberTy::Association(association) = &member.ty else {
                return Err(Error::invalid_schema(format!(
                    "policy filter on `{}.{}`, which is not an association",
                    entity.name, member.name
                )));
            };

            if association.filter.is_some() {
                match self.filter_precedence {
                    FilterPrecedence::PolicyFirst => {
                        tracing::debug!(
                            entity = %entity.name,
                            member = %member.name,
                            "policy filter shadows attribute filter"
                        );
                    }
                    FilterPrecedence::Reject => {
                        return Err(Error::ambiguous_filter_source(&entity.name, &member.name));
                    }
                }
            }

            let row = PolicyRow {
                entity: &entities[association.target.0],
            };
            let predicate = (policy.predicate)(&row)?;

            if policy_filters.insert(member.id, predicate).is_some() {
                return Err(Error::invalid_schema(format!(
                    "more than one policy filter for `{}.{}`",
                    entity.name, member.name
                )));
            }
        }

        Ok(Schema {
            entities,
            enums,
            policy_filters,
            filter_precedence: self.filter_precedence,
        })
    }
}

fn build_enums(defs: &[EnumDef]) -> Result<Vec<EnumTy>> {
    let mut names = HashSet::new();

    defs.iter()
        .enumerate()
        .map(|(index, def)| {
            if !names.insert(def.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "enum `{}` is declared twice",
                    def.name
                )));
            }

            let default_code = match &def.default_variant {
                Some(name) => match def.variants.iter().find(|v| &v.name == name) {
                    Some(variant) => Some(variant.code),
                    None => {
                        return Err(Error::invalid_schema(format!(
                            "default variant `{name}` is not a variant of enum `{}`",
                            def.name
                        )))
                    }
                },
                None => None,
            };

            Ok(EnumTy {
                id: EnumId(index),
                name: def.name.clone(),
                repr: def.repr,
                variants: def.variants.clone(),
                default_code,
            })
        })
        .collect()
}

fn declare_entities(defs: &[EntityDef]) -> Result<Vec<Entity>> {
    let mut names = HashSet::new();

    defs.iter()
        .enumerate()
        .map(|(index, def)| {
            if !names.insert(def.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "entity `{}` is declared twice",
                    def.name
                )));
            }

            Ok(Entity {
                id: EntityId(index),
                name: def.name.clone(),
                table: def.table.clone().unwrap_or_else(|| def.name.clone()),
                members: vec![],
            })
        })
        .collect()
}

fn resolve_member(
    id: MemberId,
    owner: &EntityDef,
    def: &MemberDef,
    entities: &[EntityDef],
    enums: &[EnumTy],
) -> Result<Member> {
    let ty = match &def.kind {
        MemberDefKind::Column { column, ty, sql_ty } => MemberTy::Column(ColumnMapping {
            name: column.clone().unwrap_or_else(|| def.name.clone()),
            ty: ty.clone(),
            sql_ty: *sql_ty,
        }),
        MemberDefKind::Enum {
            column,
            enum_name,
            sql_ty,
        } => {
            let Some(enum_ty) = enums.iter().find(|e| &e.name == enum_name) else {
                return Err(Error::invalid_schema(format!(
                    "member `{}` references unknown enum `{enum_name}`",
                    def.name
                )));
            };

            MemberTy::Column(ColumnMapping {
                name: column.clone().unwrap_or_else(|| def.name.clone()),
                ty: Type::Enum(enum_ty.id),
                sql_ty: *sql_ty,
            })
        }
        MemberDefKind::Composite { date, time } => MemberTy::Composite(CompositeField {
            date: member_id(id.entity, owner, date)?,
            time: member_id(id.entity, owner, time)?,
        }),
        MemberDefKind::Association {
            target,
            source_keys,
            target_keys,
            many,
            filter,
        } => {
            let Some(target_index) = entities.iter().position(|e| &e.name == target) else {
                return Err(Error::invalid_schema(format!(
                    "association `{}` targets unknown entity `{target}`",
                    def.name
                )));
            };
            let target_def = &entities[target_index];

            if source_keys.is_empty() || source_keys.len() != target_keys.len() {
                return Err(Error::invalid_schema(format!(
                    "association `{}` needs the same, non-zero number of keys on both sides",
                    def.name
                )));
            }

            MemberTy::Association(Association {
                target: EntityId(target_index),
                source_keys: source_keys
                    .iter()
                    .map(|key| member_id(id.entity, owner, key))
                    .collect::<Result<_>>()?,
                target_keys: target_keys
                    .iter()
                    .map(|key| member_id(EntityId(target_index), target_def, key))
                    .collect::<Result<_>>()?,
                many: *many,
                filter: filter.clone(),
            })
        }
    };

    Ok(Member {
        id,
        name: def.name.clone(),
        ty,
        nullable: def.nullable,
        primary_key: def.primary_key,
    })
}

fn member_id(entity: EntityId, def: &EntityDef, name: &str) -> Result<MemberId> {
    def.members
        .iter()
        .position(|member| member.name == name)
        .map(|index| MemberId { entity, index })
        .ok_or_else(|| Error::unresolved_member(&def.name, name))
}

/// Checks the references between members once every member is resolved.
fn validate_entity(entity: &Entity, entities: &[Entity]) -> Result<()> {
    let mut names = HashSet::new();

    for member in &entity.members {
        if !names.insert(member.name.as_str()) {
            return Err(Error::invalid_schema(format!(
                "member `{}.{}` is declared twice",
                entity.name, member.name
            )));
        }

        match &member.ty {
            MemberTy::Composite(composite) => {
                let date = &entity.members[composite.date.index];
                let time = &entity.members[composite.time.index];

                let date_ok = date
                    .column()
                    .is_some_and(|c| c.ty.is_date_like() && c.sql_ty.is_date_like());
                let time_ok = time
                    .column()
                    .is_some_and(|c| c.ty.is_string() && c.sql_ty.is_character());

                if !date_ok || !time_ok {
                    return Err(Error::invalid_schema(format!(
                        "composite `{}.{}` must combine a date column and a character time column",
                        entity.name, member.name
                    )));
                }
            }
            MemberTy::Association(association) => {
                let target = &entities[association.target.0];
                let keys = association
                    .source_keys
                    .iter()
                    .map(|id| &entity.members[id.index])
                    .chain(
                        association
                            .target_keys
                            .iter()
                            .map(|id| &target.members[id.index]),
                    );

                for key in keys {
                    if !key.is_column() {
                        return Err(Error::invalid_schema(format!(
                            "association `{}.{}` key `{}` is not a column",
                            entity.name, member.name, key.name
                        )));
                    }
                }

                if let Some(filter) = &association.filter {
                    if target.member_by_column(&filter.column).is_none() {
                        return Err(Error::invalid_schema(format!(
                            "association `{}.{}` filters on unknown column `{}.{}`",
                            entity.name, member.name, target.table, filter.column
                        )));
                    }
                }
            }
            MemberTy::Column(_) => {}
        }
    }

    Ok(())
}

impl EntityDef {
    pub fn new(name: impl Into<String>) -> EntityDef {
        EntityDef {
            name: name.into(),
            table: None,
            members: vec![],
        }
    }

    /// Sets the table name. Defaults to the entity name.
    pub fn table(mut self, table: impl Into<String>) -> EntityDef {
        self.table = Some(table.into());
        self
    }

    pub fn member(mut self, member: MemberDef) -> EntityDef {
        self.members.push(member);
        self
    }
}

impl MemberDef {
    fn new(name: impl Into<String>, kind: MemberDefKind) -> MemberDef {
        MemberDef {
            name: name.into(),
            kind,
            nullable: false,
            primary_key: false,
        }
    }

    /// A member stored in the column of the same name.
    pub fn column(name: impl Into<String>, ty: Type, sql_ty: SqlType) -> MemberDef {
        MemberDef::new(
            name,
            MemberDefKind::Column {
                column: None,
                ty,
                sql_ty,
            },
        )
    }

    /// A member of enum type `enum_name`.
    pub fn enumeration(
        name: impl Into<String>,
        enum_name: impl Into<String>,
        sql_ty: SqlType,
    ) -> MemberDef {
        MemberDef::new(
            name,
            MemberDefKind::Enum {
                column: None,
                enum_name: enum_name.into(),
                sql_ty,
            },
        )
    }

    /// A virtual datetime combined from the members `date` and `time`.
    pub fn composite(
        name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> MemberDef {
        MemberDef::new(
            name,
            MemberDefKind::Composite {
                date: date.into(),
                time: time.into(),
            },
        )
        .nullable()
    }

    /// A to-one association with `target`.
    pub fn belongs_to(name: impl Into<String>, target: impl Into<String>) -> MemberDef {
        MemberDef::association(name, target, false)
    }

    /// A to-many association with `target`.
    pub fn has_many(name: impl Into<String>, target: impl Into<String>) -> MemberDef {
        MemberDef::association(name, target, true)
    }

    fn association(name: impl Into<String>, target: impl Into<String>, many: bool) -> MemberDef {
        MemberDef::new(
            name,
            MemberDefKind::Association {
                target: target.into(),
                source_keys: vec![],
                target_keys: vec![],
                many,
                filter: None,
            },
        )
        .nullable()
    }

    /// Stores the member in `column` instead of a column named after it.
    pub fn column_name(mut self, name: impl Into<String>) -> MemberDef {
        match &mut self.kind {
            MemberDefKind::Column { column, .. } | MemberDefKind::Enum { column, .. } => {
                *column = Some(name.into());
            }
            _ => {}
        }
        self
    }

    pub fn nullable(mut self) -> MemberDef {
        self.nullable = true;
        self
    }

    pub fn primary_key(mut self) -> MemberDef {
        self.primary_key = true;
        self
    }

    /// Sets the key members of an association: `source` on the declaring
    /// entity, `target` on the related one, compared pairwise.
    pub fn keys<S, T>(
        mut self,
        source: impl IntoIterator<Item = S>,
        target: impl IntoIterator<Item = T>,
    ) -> MemberDef
    where
        S: Into<String>,
        T: Into<String>,
    {
        if let MemberDefKind::Association {
            source_keys,
            target_keys,
            ..
        } = &mut self.kind
        {
            *source_keys = source.into_iter().map(Into::into).collect();
            *target_keys = target.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Adds a static `column = 'value'` filter to an association.
    pub fn filter(mut self, column: impl Into<String>, value: impl Into<String>) -> MemberDef {
        if let MemberDefKind::Association { filter, .. } = &mut self.kind {
            *filter = Some(AttributeFilter {
                column: column.into(),
                value: value.into(),
            });
        }
        self
    }
}

impl EnumDef {
    /// An enum stored as a single character.
    pub fn char_backed(name: impl Into<String>) -> EnumDef {
        EnumDef {
            name: name.into(),
            repr: EnumRepr::Char,
            variants: vec![],
            default_variant: None,
        }
    }

    /// An enum stored by variant name.
    pub fn by_name(name: impl Into<String>) -> EnumDef {
        EnumDef {
            name: name.into(),
            repr: EnumRepr::Name,
            variants: vec![],
            default_variant: None,
        }
    }

    pub fn variant(mut self, name: impl Into<String>, code: i32) -> EnumDef {
        self.variants.push(EnumVariant {
            name: name.into(),
            code,
        });
        self
    }

    /// A variant whose code is the code point of `c`.
    pub fn char_variant(self, name: impl Into<String>, c: char) -> EnumDef {
        self.variant(name, c as i32)
    }

    /// The variant a blank column reads back as.
    pub fn default_variant(mut self, name: impl Into<String>) -> EnumDef {
        self.default_variant = Some(name.into());
        self
    }
}

impl PolicyRow<'_> {
    /// The related row itself.
    pub fn expr(&self) -> Expr {
        Expr::arg(0)
    }

    /// Access to `name` on the related row.
    pub fn member(&self, name: &str) -> Result<Expr> {
        self.entity
            .member_by_name(name)
            .map(|member| Expr::member(Expr::arg(0), member.id))
            .ok_or_else(|| Error::unresolved_member(&self.entity.name, name))
    }
}
